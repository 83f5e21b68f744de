//! Team and member persistence for the owner-facing management views

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_common::{conflict_on_unique, Error, Result};

use crate::domain::entities::{Team, TeamMember};

const TEAM_COLUMNS: &str =
    "id, event_id, team_name, leader_name, leader_email, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, team_id, event_id, member_name, member_email, \
                              member_student_id, created_at, updated_at";

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_event(&self, event_id: Uuid, skip: i64, limit: i64) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(&format!(
            r#"
            SELECT {TEAM_COLUMNS} FROM teams
            WHERE event_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(event_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(teams)
    }

    pub async fn find_in_event(&self, event_id: Uuid, team_id: Uuid) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1 AND event_id = $2"
        ))
        .bind(team_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(team)
    }

    pub async fn update(&self, team: &Team) -> Result<Team> {
        let updated = sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE teams
            SET team_name = $2, leader_name = $3, leader_email = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(team.id)
        .bind(&team.team_name)
        .bind(&team.leader_name)
        .bind(&team.leader_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        updated.ok_or_else(|| Error::NotFound("Team not found".to_string()))
    }

    pub async fn list_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM team_members
            WHERE team_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(members)
    }

    pub async fn find_member(&self, team_id: Uuid, member_id: Uuid) -> Result<Option<TeamMember>> {
        let member = sqlx::query_as::<_, TeamMember>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members WHERE id = $1 AND team_id = $2"
        ))
        .bind(member_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(member)
    }

    /// Update a member's details. The per-event unique indexes still
    /// apply, so moving a member onto an already-registered email or
    /// student ID surfaces as `Conflict`.
    pub async fn update_member(&self, member: &TeamMember) -> Result<TeamMember> {
        let updated = sqlx::query_as::<_, TeamMember>(&format!(
            r#"
            UPDATE team_members
            SET member_name = $2, member_email = $3, member_student_id = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(member.id)
        .bind(&member.member_name)
        .bind(&member.member_email)
        .bind(&member.member_student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "A team member is already registered for this event")
        })?;

        updated.ok_or_else(|| Error::NotFound("Team member not found".to_string()))
    }

    pub async fn delete_member(&self, team_id: Uuid, member_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1 AND team_id = $2")
            .bind(member_id)
            .bind(team_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Team member not found".to_string()));
        }

        Ok(())
    }
}
