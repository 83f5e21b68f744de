//! Event persistence

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_common::{conflict_on_unique, Error, Result};

use crate::domain::entities::{Event, EventStatus};

const EVENT_COLUMNS: &str = "id, club_id, title, slug, type, description, poster_url, \
                             start_time, end_time, registration_deadline, location, \
                             max_participants, status, created_at, updated_at";

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, event: &Event) -> Result<Event> {
        let created = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, club_id, title, slug, type, description, poster_url,
                                start_time, end_time, registration_deadline, location,
                                max_participants, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(event.club_id)
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(&event.poster_url)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.registration_deadline)
        .bind(&event.location)
        .bind(event.max_participants)
        .bind(event.status)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "An event with this slug already exists"))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(event)
    }

    /// Find an event within its club; the pair acts as a verified link.
    pub async fn find_in_club(&self, club_id: Uuid, event_id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 AND club_id = $2"
        ))
        .bind(event_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(event)
    }

    pub async fn list_by_status(
        &self,
        club_id: Uuid,
        status: EventStatus,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE club_id = $1 AND status = $2
            ORDER BY start_time ASC
            OFFSET $3 LIMIT $4
            "#
        ))
        .bind(club_id)
        .bind(status)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(events)
    }

    pub async fn list_all(&self, club_id: Uuid, skip: i64, limit: i64) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE club_id = $1
            ORDER BY start_time ASC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(club_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(events)
    }

    pub async fn update(&self, event: &Event) -> Result<Event> {
        let updated = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = $2, slug = $3, type = $4, description = $5, poster_url = $6,
                start_time = $7, end_time = $8, registration_deadline = $9, location = $10,
                max_participants = $11, status = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(&event.poster_url)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.registration_deadline)
        .bind(&event.location)
        .bind(event.max_participants)
        .bind(event.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "An event with this slug already exists"))?;

        updated.ok_or_else(|| Error::NotFound("Event not found".to_string()))
    }

    /// Delete an event and, via FK cascade, its forms, teams, responses
    /// and registrations.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Event not found".to_string()));
        }

        Ok(())
    }
}
