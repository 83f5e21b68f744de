//! Authentication middleware for the ClubHub API
//!
//! Provides session token issue/validation, an HTTP-only cookie carrier,
//! axum extractors that work with any domain state implementing
//! `FromRef<S>` for `AuthBackend`, and the centralized ownership checks
//! shared by every owner-gated operation.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod scope;
mod token;
mod types;

pub use backend::AuthBackend;
pub use claims::SessionClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{AdminUser, AuthUser};
pub use scope::{ClubScope, EventScope};
pub use token::{issue_token, session_cookie, session_cookie_clear, SESSION_COOKIE};
pub use types::{AuthIdentity, AuthRole};
