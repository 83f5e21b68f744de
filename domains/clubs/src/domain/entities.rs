//! Domain entities for the ClubHub clubs domain
//!
//! Users and clubs, with the business rules for registration and the
//! admin approval gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubhub_common::{hash_password, Error, Result};
use validator::ValidateEmail;

/// User role levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    /// Granted automatically when one of the user's clubs is approved
    Club,
    #[default]
    Regular,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Club => write!(f, "club"),
            UserRole::Regular => write!(f, "regular"),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub university_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new regular user with a freshly hashed password
    pub fn new(
        name: String,
        email: String,
        password: &str,
        university_id: Option<String>,
    ) -> Result<Self> {
        Self::with_role(name, email, password, university_id, UserRole::Regular)
    }

    /// Create a new user with an explicit role (admin bootstrap)
    pub fn with_role(
        name: String,
        email: String,
        password: &str,
        university_id: Option<String>,
        role: UserRole,
    ) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Name must be 1-100 characters".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(Error::Validation("Password must not be empty".to_string()));
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: hash_password(password),
            role,
            university_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Promote the user to the club-owner role.
    ///
    /// Admins keep their role; the promotion only lifts regular users.
    pub fn promote_to_club_owner(&mut self) {
        if self.role == UserRole::Regular {
            self.role = UserRole::Club;
            self.updated_at = Utc::now();
        }
    }
}

/// Club approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "club_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClubStatus {
    #[default]
    Pending,
    Active,
    Rejected,
}

impl std::fmt::Display for ClubStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClubStatus::Pending => write!(f, "pending"),
            ClubStatus::Active => write!(f, "active"),
            ClubStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Club entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub website: Option<String>,
    pub status: ClubStatus,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    /// Create a new pending club owned by `created_by`
    pub fn new(
        name: String,
        slug: String,
        description: Option<String>,
        logo_url: Option<String>,
        banner_url: Option<String>,
        website: Option<String>,
        created_by: Uuid,
    ) -> Result<Self> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Club name must be 1-100 characters".to_string(),
            ));
        }
        Self::validate_slug(&slug)?;

        let now = Utc::now();
        Ok(Club {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            logo_url,
            banner_url,
            website,
            status: ClubStatus::default(),
            created_by,
            approved_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate slug format: lowercase alphanumerics separated by single
    /// hyphens, 1-50 characters
    pub fn validate_slug(slug: &str) -> Result<()> {
        if slug.is_empty() || slug.len() > 50 {
            return Err(Error::Validation(
                "Slug must be 1-50 characters".to_string(),
            ));
        }

        let pattern = regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        if !pattern.is_match(slug) {
            return Err(Error::Validation(
                "Slug may only contain lowercase letters, digits and single hyphens".to_string(),
            ));
        }

        Ok(())
    }

    /// Mark the club approved by `admin_id`
    pub fn approve(&mut self, admin_id: Uuid) {
        self.status = ClubStatus::Active;
        self.approved_by = Some(admin_id);
        self.updated_at = Utc::now();
    }

    /// Mark the club rejected by `admin_id`
    pub fn reject(&mut self, admin_id: Uuid) {
        self.status = ClubStatus::Rejected;
        self.approved_by = Some(admin_id);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubhub_common::verify_password;

    #[test]
    fn test_user_creation_hashes_password() {
        let user = User::new(
            "Alif".to_string(),
            "alif@uni.edu".to_string(),
            "hunter2",
            Some("UNI-001".to_string()),
        )
        .unwrap();

        assert_eq!(user.role, UserRole::Regular);
        assert_ne!(user.password_hash, "hunter2");
        assert!(verify_password("hunter2", &user.password_hash));
    }

    #[test]
    fn test_user_validation() {
        assert!(User::new("".to_string(), "a@b.co".to_string(), "pw", None).is_err());
        assert!(User::new("Name".to_string(), "not-an-email".to_string(), "pw", None).is_err());
        assert!(User::new("Name".to_string(), "a@b.co".to_string(), "", None).is_err());
    }

    #[test]
    fn test_promote_to_club_owner() {
        let mut user = User::new("N".to_string(), "n@uni.edu".to_string(), "pw", None).unwrap();
        user.promote_to_club_owner();
        assert_eq!(user.role, UserRole::Club);

        // Admins are left alone
        let mut admin = User::with_role(
            "A".to_string(),
            "a@uni.edu".to_string(),
            "pw",
            None,
            UserRole::Admin,
        )
        .unwrap();
        admin.promote_to_club_owner();
        assert_eq!(admin.role, UserRole::Admin);
    }

    #[test]
    fn test_club_creation_defaults() {
        let owner = Uuid::new_v4();
        let club = Club::new(
            "Chess Club".to_string(),
            "chess-club".to_string(),
            Some("We play chess".to_string()),
            None,
            None,
            None,
            owner,
        )
        .unwrap();

        assert_eq!(club.status, ClubStatus::Pending);
        assert_eq!(club.created_by, owner);
        assert!(club.approved_by.is_none());
    }

    #[test]
    fn test_club_slug_validation() {
        assert!(Club::validate_slug("chess-club").is_ok());
        assert!(Club::validate_slug("c42").is_ok());
        assert!(Club::validate_slug("").is_err());
        assert!(Club::validate_slug("-leading").is_err());
        assert!(Club::validate_slug("trailing-").is_err());
        assert!(Club::validate_slug("UPPER").is_err());
        assert!(Club::validate_slug("two--hyphens").is_err());
    }

    #[test]
    fn test_club_approve_and_reject() {
        let admin = Uuid::new_v4();
        let mut club = Club::new(
            "Chess Club".to_string(),
            "chess-club".to_string(),
            None,
            None,
            None,
            None,
            Uuid::new_v4(),
        )
        .unwrap();

        club.approve(admin);
        assert_eq!(club.status, ClubStatus::Active);
        assert_eq!(club.approved_by, Some(admin));

        club.reject(admin);
        assert_eq!(club.status, ClubStatus::Rejected);
    }
}
