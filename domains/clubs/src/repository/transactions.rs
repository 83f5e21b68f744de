//! Transactional operations spanning users and clubs
//!
//! Free functions over a borrowed transaction so callers control the
//! commit point.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use clubhub_common::{Error, Result};

use crate::domain::entities::{Club, ClubStatus, User, UserRole};

/// Approve a club and promote its owner in one transaction.
///
/// The owner is lifted from `regular` to `club`; admins keep their role.
pub async fn approve_club_tx(
    tx: &mut Transaction<'_, Postgres>,
    club_id: Uuid,
    admin_id: Uuid,
) -> Result<Club> {
    let club = sqlx::query_as::<_, Club>(
        r#"
        UPDATE clubs
        SET status = $2, approved_by = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, slug, description, logo_url, banner_url, website,
                  status, created_by, approved_by, created_at, updated_at
        "#,
    )
    .bind(club_id)
    .bind(ClubStatus::Active)
    .bind(admin_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(Error::Database)?
    .ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

    sqlx::query(
        "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 AND role = $3",
    )
    .bind(club.created_by)
    .bind(UserRole::Club)
    .bind(UserRole::Regular)
    .execute(&mut **tx)
    .await
    .map_err(Error::Database)?;

    Ok(club)
}

/// Set a user's role, returning the updated row
pub async fn set_user_role_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    role: UserRole,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET role = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, university_id, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(role)
    .fetch_optional(&mut **tx)
    .await
    .map_err(Error::Database)?
    .ok_or_else(|| Error::NotFound("User not found".to_string()))
}

/// Insert the bootstrap admin inside a transaction. Used on first login
/// when the users table is still empty, so a concurrent bootstrap loses
/// on the email unique constraint rather than racing.
pub async fn create_admin_user_tx(
    tx: &mut Transaction<'_, Postgres>,
    admin: &User,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, university_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, email, password_hash, role, university_id, created_at, updated_at
        "#,
    )
    .bind(admin.id)
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(admin.role)
    .bind(&admin.university_id)
    .bind(admin.created_at)
    .bind(admin.updated_at)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| clubhub_common::conflict_on_unique(e, "Admin account already exists"))
}
