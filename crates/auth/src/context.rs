//! Authorization context for authenticated callers

use crate::types::{AuthIdentity, AuthRole};
use clubhub_common::{Error, Result};

/// Represents an authenticated caller
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    /// Check if the caller is an administrator
    pub fn is_admin(&self) -> bool {
        self.user.role == AuthRole::Admin
    }

    /// Require the admin role, failing with 403 otherwise
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Authorization("Admin user required".to_string()))
        }
    }

    /// Check whether the caller may act as the owner identified by
    /// `created_by`: either the caller created the resource, or the
    /// caller is an admin.
    pub fn owns(&self, created_by: uuid::Uuid) -> bool {
        self.user.id == created_by || self.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn identity(role: AuthRole) -> AuthIdentity {
        AuthIdentity {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@uni.edu".to_string(),
            role,
            university_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthContext::new(identity(AuthRole::Admin));
        let regular = AuthContext::new(identity(AuthRole::Regular));

        assert!(admin.require_admin().is_ok());
        assert!(matches!(
            regular.require_admin(),
            Err(Error::Authorization(_))
        ));
    }

    #[test]
    fn test_owns_matches_creator() {
        let ctx = AuthContext::new(identity(AuthRole::Regular));
        assert!(ctx.owns(ctx.user.id));
        assert!(!ctx.owns(Uuid::new_v4()));
    }

    #[test]
    fn test_admin_owns_everything() {
        let ctx = AuthContext::new(identity(AuthRole::Admin));
        assert!(ctx.owns(Uuid::new_v4()));
    }

    #[test]
    fn test_club_role_is_not_admin() {
        let ctx = AuthContext::new(identity(AuthRole::Club));
        assert!(!ctx.is_admin());
        assert!(ctx.require_admin().is_err());
    }
}
