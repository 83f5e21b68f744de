//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::token::extract_session_token;

/// Authenticated caller extractor (session cookie or bearer token)
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let token = extract_session_token(&parts.headers)?;
        let auth_context = backend.authenticate(&token).await?;

        Ok(AuthUser(auth_context))
    }
}

/// Admin-only extractor.
///
/// Like `AuthUser` but rejects non-admin callers with 403 FORBIDDEN.
/// Use this for admin-wide listings and the club approval gate.
#[derive(Debug)]
pub struct AdminUser(pub AuthContext);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        use axum::response::IntoResponse;

        let AuthUser(auth_context) = AuthUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        auth_context
            .require_admin()
            .map_err(IntoResponse::into_response)?;

        Ok(AdminUser(auth_context))
    }
}
