//! Registration and form-response persistence

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_common::{Error, Result};

use crate::domain::entities::{
    FormResponse, Registration, RegistrationDetail, RegistrationStats, Team, TeamMember,
    TeamWithMembers,
};

const REGISTRATION_COLUMNS: &str = "id, event_id, form_response_id, team_id, status, \
                                    payment_status, ticket_code, registered_at";

#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_in_event(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
    ) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1 AND event_id = $2"
        ))
        .bind(registration_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(registration)
    }

    pub async fn list_by_event(
        &self,
        event_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS} FROM registrations
            WHERE event_id = $1
            ORDER BY registered_at DESC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(event_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(registrations)
    }

    pub async fn update(&self, registration: &Registration) -> Result<Registration> {
        let updated = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE registrations
            SET status = $2, payment_status = $3, ticket_code = $4
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.id)
        .bind(registration.status)
        .bind(registration.payment_status)
        .bind(&registration.ticket_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        updated.ok_or_else(|| Error::NotFound("Registration not found".to_string()))
    }

    /// Denormalized read-back: registration + team with members + the
    /// form response, as returned by submission and detail endpoints.
    pub async fn find_detail(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
    ) -> Result<Option<RegistrationDetail>> {
        let Some(registration) = self.find_in_event(event_id, registration_id).await? else {
            return Ok(None);
        };

        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, event_id, team_name, leader_name, leader_email, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(registration.team_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, team_id, event_id, member_name, member_email, member_student_id,
                   created_at, updated_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(registration.team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let form_response = sqlx::query_as::<_, FormResponse>(
            "SELECT id, form_id, response_content, submitted_at FROM form_responses WHERE id = $1",
        )
        .bind(registration.form_response_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(Some(RegistrationDetail {
            registration,
            team: TeamWithMembers { team, members },
            form_response,
        }))
    }

    /// Six counts in one round trip
    pub async fn stats(&self, event_id: Uuid) -> Result<RegistrationStats> {
        let stats = sqlx::query_as::<_, RegistrationStats>(
            r#"
            SELECT
                COUNT(*) AS total_registrations,
                COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                COUNT(*) FILTER (WHERE payment_status = 'paid') AS paid,
                COUNT(*) FILTER (WHERE payment_status = 'unpaid') AS unpaid,
                COUNT(*) FILTER (WHERE payment_status = 'refunded') AS refunded
            FROM registrations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(stats)
    }

    pub async fn list_responses(
        &self,
        form_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FormResponse>> {
        let responses = sqlx::query_as::<_, FormResponse>(
            r#"
            SELECT id, form_id, response_content, submitted_at
            FROM form_responses
            WHERE form_id = $1
            ORDER BY submitted_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(form_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(responses)
    }

    pub async fn find_response_in_form(
        &self,
        form_id: Uuid,
        response_id: Uuid,
    ) -> Result<Option<FormResponse>> {
        let response = sqlx::query_as::<_, FormResponse>(
            r#"
            SELECT id, form_id, response_content, submitted_at
            FROM form_responses
            WHERE id = $1 AND form_id = $2
            "#,
        )
        .bind(response_id)
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(response)
    }
}
