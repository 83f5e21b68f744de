pub mod auth;
pub mod clubs;
pub mod users;

use serde::Serialize;
use uuid::Uuid;

use chrono::{DateTime, Utc};

use crate::domain::entities::{User, UserRole};

/// User representation returned by the API. Never carries the password
/// hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub university_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            university_id: user.university_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
