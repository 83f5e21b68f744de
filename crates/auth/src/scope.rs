//! Centralized ownership and link-chain checks
//!
//! Every owner-gated operation under `/club/{club_id}/event/{event_id}/...`
//! resolves its scope here instead of re-implementing the check per
//! endpoint. The chain is verified link by link first (club exists,
//! event belongs to club, form belongs to event); a broken link surfaces
//! as `NotFound` so non-owners cannot probe for resource existence.
//! Only then is ownership checked, surfacing as 403.

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_common::{Error, Result};

use crate::context::AuthContext;

#[derive(Debug, Clone, sqlx::FromRow)]
struct ScopeRow {
    club_id: Uuid,
    event_id: Uuid,
    created_by: Uuid,
}

/// A verified club scope (no event link yet).
#[derive(Debug, Clone)]
pub struct ClubScope {
    pub club_id: Uuid,
    /// Owner of the club
    pub created_by: Uuid,
}

impl ClubScope {
    pub async fn verify(pool: &PgPool, club_id: Uuid) -> Result<Self> {
        let row: Option<(Uuid, Uuid)> =
            sqlx::query_as("SELECT id, created_by FROM clubs WHERE id = $1")
                .bind(club_id)
                .fetch_optional(pool)
                .await?;

        let (club_id, created_by) =
            row.ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

        Ok(ClubScope {
            club_id,
            created_by,
        })
    }

    /// Verify the club exists and that the caller owns it (or is an
    /// admin).
    pub async fn verify_owned(pool: &PgPool, ctx: &AuthContext, club_id: Uuid) -> Result<Self> {
        let scope = Self::verify(pool, club_id).await?;
        scope.require_owner(ctx)?;
        Ok(scope)
    }

    pub fn require_owner(&self, ctx: &AuthContext) -> Result<()> {
        if ctx.owns(self.created_by) {
            Ok(())
        } else {
            Err(Error::Authorization(
                "You are not the owner of the club".to_string(),
            ))
        }
    }
}

/// A verified club → event scope.
#[derive(Debug, Clone)]
pub struct EventScope {
    pub club_id: Uuid,
    pub event_id: Uuid,
    /// Owner of the parent club
    pub created_by: Uuid,
}

impl EventScope {
    /// Verify that `event_id` belongs to `club_id`. Public reads stop here.
    pub async fn verify(pool: &PgPool, club_id: Uuid, event_id: Uuid) -> Result<Self> {
        let row: Option<ScopeRow> = sqlx::query_as(
            r#"
            SELECT c.id AS club_id, e.id AS event_id, c.created_by
            FROM clubs c
            INNER JOIN events e ON e.club_id = c.id
            WHERE c.id = $1 AND e.id = $2
            "#,
        )
        .bind(club_id)
        .bind(event_id)
        .fetch_optional(pool)
        .await?;

        let row = row.ok_or_else(|| {
            Error::NotFound("Event not found or not part of this club".to_string())
        })?;

        Ok(EventScope {
            club_id: row.club_id,
            event_id: row.event_id,
            created_by: row.created_by,
        })
    }

    /// Verify the chain and that the caller owns the parent club
    /// (or is an admin).
    pub async fn verify_owned(
        pool: &PgPool,
        ctx: &AuthContext,
        club_id: Uuid,
        event_id: Uuid,
    ) -> Result<Self> {
        let scope = Self::verify(pool, club_id, event_id).await?;
        scope.require_owner(ctx)?;
        Ok(scope)
    }

    /// Verify the chain extended through a form: `form_id` must belong
    /// to `event_id`, which must belong to `club_id`.
    pub async fn verify_form(
        pool: &PgPool,
        club_id: Uuid,
        event_id: Uuid,
        form_id: Uuid,
    ) -> Result<Self> {
        let row: Option<ScopeRow> = sqlx::query_as(
            r#"
            SELECT c.id AS club_id, e.id AS event_id, c.created_by
            FROM clubs c
            INNER JOIN events e ON e.club_id = c.id
            INNER JOIN forms f ON f.event_id = e.id
            WHERE c.id = $1 AND e.id = $2 AND f.id = $3
            "#,
        )
        .bind(club_id)
        .bind(event_id)
        .bind(form_id)
        .fetch_optional(pool)
        .await?;

        let row = row.ok_or_else(|| {
            Error::NotFound("Form not found or not part of this event".to_string())
        })?;

        Ok(EventScope {
            club_id: row.club_id,
            event_id: row.event_id,
            created_by: row.created_by,
        })
    }

    /// Require that the caller owns this scope's club, or is an admin.
    pub fn require_owner(&self, ctx: &AuthContext) -> Result<()> {
        if ctx.owns(self.created_by) {
            Ok(())
        } else {
            Err(Error::Authorization(
                "You are not the owner of the club".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthIdentity, AuthRole};
    use chrono::Utc;

    fn ctx(id: Uuid, role: AuthRole) -> AuthContext {
        AuthContext::new(AuthIdentity {
            id,
            name: "Test".to_string(),
            email: "t@uni.edu".to_string(),
            role,
            university_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    #[test]
    fn test_require_owner_accepts_creator() {
        let owner = Uuid::new_v4();
        let scope = EventScope {
            club_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            created_by: owner,
        };

        assert!(scope.require_owner(&ctx(owner, AuthRole::Club)).is_ok());
    }

    #[test]
    fn test_require_owner_rejects_stranger() {
        let scope = EventScope {
            club_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
        };

        let result = scope.require_owner(&ctx(Uuid::new_v4(), AuthRole::Regular));
        assert!(matches!(result, Err(Error::Authorization(_))));
    }

    #[test]
    fn test_require_owner_accepts_admin() {
        let scope = EventScope {
            club_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
        };

        assert!(scope
            .require_owner(&ctx(Uuid::new_v4(), AuthRole::Admin))
            .is_ok());
    }
}
