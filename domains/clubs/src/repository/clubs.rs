//! Club persistence

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_common::{conflict_on_unique, Error, Result};

use crate::domain::entities::{Club, ClubStatus};

const CLUB_COLUMNS: &str = "id, name, slug, description, logo_url, banner_url, website, \
                            status, created_by, approved_by, created_at, updated_at";

#[derive(Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a club. The unique index on `created_by` rejects a second
    /// club per owner; the unique slug rejects duplicate slugs. Both
    /// surface as Conflict.
    pub async fn create(&self, club: &Club) -> Result<Club> {
        let created = sqlx::query_as::<_, Club>(&format!(
            r#"
            INSERT INTO clubs (id, name, slug, description, logo_url, banner_url, website,
                               status, created_by, approved_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {CLUB_COLUMNS}
            "#
        ))
        .bind(club.id)
        .bind(&club.name)
        .bind(&club.slug)
        .bind(&club.description)
        .bind(&club.logo_url)
        .bind(&club.banner_url)
        .bind(&club.website)
        .bind(club.status)
        .bind(club.created_by)
        .bind(club.approved_by)
        .bind(club.created_at)
        .bind(club.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "You already have a club, or the slug is taken"))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(club)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(club)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE created_by = $1"
        ))
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(club)
    }

    pub async fn list_by_status(
        &self,
        status: ClubStatus,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            r#"
            SELECT {CLUB_COLUMNS} FROM clubs
            WHERE status = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(status)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(clubs)
    }

    pub async fn list_all(&self, skip: i64, limit: i64) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            r#"
            SELECT {CLUB_COLUMNS} FROM clubs
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(clubs)
    }

    pub async fn update(&self, club: &Club) -> Result<Club> {
        let updated = sqlx::query_as::<_, Club>(&format!(
            r#"
            UPDATE clubs
            SET name = $2, slug = $3, description = $4, logo_url = $5, banner_url = $6,
                website = $7, status = $8, approved_by = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLUB_COLUMNS}
            "#
        ))
        .bind(club.id)
        .bind(&club.name)
        .bind(&club.slug)
        .bind(&club.description)
        .bind(&club.logo_url)
        .bind(&club.banner_url)
        .bind(&club.website)
        .bind(club.status)
        .bind(club.approved_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "The slug is already taken"))?;

        updated.ok_or_else(|| Error::NotFound("Club not found".to_string()))
    }

    /// Delete a club and, via FK cascade, its events, forms, teams and
    /// registrations.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Club not found".to_string()));
        }

        Ok(())
    }
}
