//! Authentication endpoints: register, login, logout, whoami
//!
//! Sessions are carried in an HTTP-only cookie; the login response also
//! returns the token in the body for non-browser clients.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use clubhub_auth::{issue_token, session_cookie, session_cookie_clear, AuthUser};
use clubhub_common::{verify_password, Error, Result, ValidatedJson};

use crate::api::handlers::UserProfile;
use crate::api::middleware::ClubsState;
use crate::domain::entities::{User, UserRole};
use crate::repository::create_admin_user_tx;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub university_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ClubsState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Response> {
    let user = User::new(req.name, req.email, &req.password, req.university_id)?;
    let created = state.repos.users.create(&user).await?;

    tracing::info!(user_id = %created.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserProfile::from(created))).into_response())
}

/// POST /api/auth/token
///
/// On the very first login against an empty users table, credentials
/// matching the configured admin account create that account on the
/// fly. Every later login is a plain credential check.
pub async fn login(
    State(state): State<ClubsState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Response> {
    let user = match state.repos.users.find_by_email(&req.email).await? {
        Some(user) => user,
        None => bootstrap_admin(&state, &req).await?,
    };

    if !verify_password(&req.password, &user.password_hash) {
        return Err(Error::Authentication(
            "Incorrect email or password".to_string(),
        ));
    }

    let token = issue_token(&user.email, user.id, state.auth.config())?;

    tracing::info!(user_id = %user.id, "User logged in");

    let body = Json(TokenResponse {
        access_token: token.clone(),
        token_type: "bearer",
    });

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token))],
        body,
    )
        .into_response())
}

/// Create the configured admin account if the users table is empty and
/// the supplied credentials match the configured pair.
async fn bootstrap_admin(state: &ClubsState, req: &LoginRequest) -> Result<User> {
    let invalid = || Error::Authentication("Incorrect email or password".to_string());

    if state.repos.users.any_user_exists().await? {
        return Err(invalid());
    }
    if req.email != state.config.admin_email || req.password != state.config.admin_password {
        return Err(invalid());
    }

    let admin = User::with_role(
        state.config.admin_name.clone(),
        state.config.admin_email.clone(),
        &state.config.admin_password,
        None,
        UserRole::Admin,
    )?;

    let mut tx = state.repos.begin().await?;
    let created = create_admin_user_tx(&mut tx, &admin).await?;
    tx.commit().await.map_err(Error::Database)?;

    tracing::info!(user_id = %created.id, "Bootstrapped admin account");

    Ok(created)
}

/// POST /api/auth/logout
pub async fn logout() -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie_clear())],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response()
}

/// GET /api/auth/whoami
pub async fn whoami(AuthUser(ctx): AuthUser) -> Response {
    Json(ctx.user).into_response()
}
