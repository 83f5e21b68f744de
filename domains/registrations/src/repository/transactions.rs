//! The public submission workflow
//!
//! One transaction covers the duplicate-member check and all four
//! inserts (team, members, form response, registration), so a failure
//! at any step leaves nothing behind.

use sqlx::{Postgres, Transaction};

use clubhub_common::{conflict_on_unique, Error, Result};

use crate::domain::entities::{FormResponse, Registration, Team, TeamMember};

/// Insert a complete submission.
///
/// The in-transaction duplicate check is a fast path that produces a
/// precise message; the unique indexes on `team_members(event_id,
/// member_email)` and `(event_id, member_student_id)` remain the
/// authoritative guard against concurrent submissions, surfacing as
/// `Conflict` through the 23505 translation.
pub async fn submit_registration_tx(
    tx: &mut Transaction<'_, Postgres>,
    team: &Team,
    members: &[TeamMember],
    form_response: &FormResponse,
    registration: &Registration,
) -> Result<()> {
    check_duplicate_members(tx, members).await?;

    sqlx::query(
        r#"
        INSERT INTO teams (id, event_id, team_name, leader_name, leader_email,
                           created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(team.id)
    .bind(team.event_id)
    .bind(&team.team_name)
    .bind(&team.leader_name)
    .bind(&team.leader_email)
    .bind(team.created_at)
    .bind(team.updated_at)
    .execute(&mut **tx)
    .await
    .map_err(Error::Database)?;

    for member in members {
        sqlx::query(
            r#"
            INSERT INTO team_members (id, team_id, event_id, member_name, member_email,
                                      member_student_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id)
        .bind(member.team_id)
        .bind(member.event_id)
        .bind(&member.member_name)
        .bind(&member.member_email)
        .bind(&member.member_student_id)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "A team member is already registered for this event")
        })?;
    }

    sqlx::query(
        r#"
        INSERT INTO form_responses (id, form_id, response_content, submitted_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(form_response.id)
    .bind(form_response.form_id)
    .bind(&form_response.response_content)
    .bind(form_response.submitted_at)
    .execute(&mut **tx)
    .await
    .map_err(Error::Database)?;

    sqlx::query(
        r#"
        INSERT INTO registrations (id, event_id, form_response_id, team_id, status,
                                   payment_status, ticket_code, registered_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(registration.id)
    .bind(registration.event_id)
    .bind(registration.form_response_id)
    .bind(registration.team_id)
    .bind(registration.status)
    .bind(registration.payment_status)
    .bind(&registration.ticket_code)
    .bind(registration.registered_at)
    .execute(&mut **tx)
    .await
    .map_err(|e| conflict_on_unique(e, "This form response is already registered"))?;

    Ok(())
}

/// Fast-path duplicate check with a message naming the offender.
async fn check_duplicate_members(
    tx: &mut Transaction<'_, Postgres>,
    members: &[TeamMember],
) -> Result<()> {
    let Some(first) = members.first() else {
        return Err(Error::Validation(
            "A team needs at least one member".to_string(),
        ));
    };

    let emails: Vec<String> = members.iter().map(|m| m.member_email.clone()).collect();
    let student_ids: Vec<String> = members
        .iter()
        .filter_map(|m| m.member_student_id.clone())
        .collect();

    let taken: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT member_email FROM team_members
        WHERE event_id = $1
          AND (member_email = ANY($2) OR member_student_id = ANY($3))
        "#,
    )
    .bind(first.event_id)
    .bind(&emails)
    .bind(&student_ids)
    .fetch_all(&mut **tx)
    .await
    .map_err(Error::Database)?;

    if let Some(email) = taken.first() {
        return Err(Error::Conflict(format!(
            "Member '{email}' is already registered for this event"
        )));
    }

    Ok(())
}
