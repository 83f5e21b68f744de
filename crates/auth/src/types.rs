//! Lightweight auth-side read models
//!
//! These mirror the clubs domain's user types just closely enough to
//! resolve "who is the caller" without depending on the domain crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller role, mirrored from the users table.
///
/// `Club` is granted automatically when one of the user's clubs is
/// approved; `Admin` is the bootstrap/operator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthRole {
    Admin,
    Club,
    #[default]
    Regular,
}

impl std::fmt::Display for AuthRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRole::Admin => write!(f, "admin"),
            AuthRole::Club => write!(f, "club"),
            AuthRole::Regular => write!(f, "regular"),
        }
    }
}

/// Authenticated caller identity (CQRS read model — subset of User,
/// never includes the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AuthRole,
    pub university_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
