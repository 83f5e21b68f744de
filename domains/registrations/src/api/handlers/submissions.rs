//! Public submission endpoint and owner-facing form-response reads
//!
//! Submission is the one unauthenticated write in the system: anyone
//! may register a team against a published form.

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use clubhub_auth::{AuthUser, EventScope};
use clubhub_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::RegistrationsState;
use crate::domain::entities::{
    FormResponse, Registration, RegistrationDetail, Team, TeamMember, TeamWithMembers,
};
use crate::repository::submit_registration_tx;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MemberInput {
    #[validate(length(min = 1, max = 100))]
    pub member_name: String,
    #[validate(email)]
    pub member_email: String,
    pub member_student_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmissionRequest {
    #[validate(length(min = 1, max = 100))]
    pub team_name: String,
    #[validate(length(min = 1, max = 100))]
    pub leader_name: String,
    #[validate(email)]
    pub leader_email: String,
    #[validate(nested, length(min = 1, max = 50))]
    pub members: Vec<MemberInput>,
    #[validate(length(min = 1))]
    pub response_content: String,
}

/// POST .../form/{form_id}/form-response/create — public
///
/// Creates team, members, form response and registration in a single
/// transaction. The chain is verified first (broken link ⇒ 404), then
/// the form must be published (⇒ 400 otherwise).
pub async fn create_submission(
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, form_id)): Path<(Uuid, Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<SubmissionRequest>,
) -> Result<Response> {
    EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;
    require_published_form(&state, form_id).await?;
    check_payload_duplicates(&req.members)?;

    let team = Team::new(event_id, req.team_name, req.leader_name, req.leader_email)?;
    let members = req
        .members
        .into_iter()
        .map(|m| {
            TeamMember::new(
                team.id,
                event_id,
                m.member_name,
                m.member_email,
                m.member_student_id,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    let form_response = FormResponse::new(form_id, req.response_content)?;
    let registration = Registration::new(event_id, form_response.id, team.id);

    let mut tx = state.repos.begin().await?;
    submit_registration_tx(&mut tx, &team, &members, &form_response, &registration).await?;
    tx.commit().await.map_err(Error::Database)?;

    tracing::info!(
        registration_id = %registration.id,
        event_id = %event_id,
        team_size = members.len(),
        "Registration submitted"
    );

    let detail = RegistrationDetail {
        registration,
        team: TeamWithMembers { team, members },
        form_response,
    };

    Ok((StatusCode::CREATED, Json(detail)).into_response())
}

/// Only published forms accept submissions (CQRS read of the forms
/// table; the chain itself was already verified).
async fn require_published_form(state: &RegistrationsState, form_id: Uuid) -> Result<()> {
    let status: Option<String> =
        sqlx::query_scalar("SELECT status::text FROM forms WHERE id = $1")
            .bind(form_id)
            .fetch_optional(state.repos.pool())
            .await
            .map_err(Error::Database)?;

    match status.as_deref() {
        Some("published") => Ok(()),
        Some(_) => Err(Error::Validation(
            "This form is not accepting submissions".to_string(),
        )),
        None => Err(Error::NotFound(
            "Form not found or not part of this event".to_string(),
        )),
    }
}

/// Reject duplicate emails or student IDs within a single payload
/// before touching the database.
fn check_payload_duplicates(members: &[MemberInput]) -> Result<()> {
    let mut emails = HashSet::new();
    let mut student_ids = HashSet::new();

    for member in members {
        if !emails.insert(member.member_email.as_str()) {
            return Err(Error::Validation(format!(
                "Duplicate member email '{}' in submission",
                member.member_email
            )));
        }
        if let Some(sid) = &member.member_student_id {
            if !student_ids.insert(sid.as_str()) {
                return Err(Error::Validation(format!(
                    "Duplicate student ID '{sid}' in submission"
                )));
            }
        }
    }

    Ok(())
}

/// GET .../form/{form_id}/form-response — owner listing
pub async fn list_form_responses(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, form_id)): Path<(Uuid, Uuid, Uuid)>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    let scope = EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;
    scope.require_owner(&ctx)?;

    let responses = state
        .repos
        .registrations
        .list_responses(form_id, page.skip(), page.limit())
        .await?;

    Ok(Json(responses).into_response())
}

/// GET .../form/{form_id}/form-response/{response_id} — owner read
pub async fn get_form_response(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, form_id, response_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    let scope = EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;
    scope.require_owner(&ctx)?;

    let response = state
        .repos
        .registrations
        .find_response_in_form(form_id, response_id)
        .await?
        .ok_or_else(|| Error::NotFound("Form response not found".to_string()))?;

    Ok(Json(response).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(email: &str, sid: Option<&str>) -> MemberInput {
        MemberInput {
            member_name: "M".to_string(),
            member_email: email.to_string(),
            member_student_id: sid.map(String::from),
        }
    }

    #[test]
    fn test_payload_duplicate_email_rejected() {
        let members = vec![member("a@uni.edu", None), member("a@uni.edu", None)];
        assert!(matches!(
            check_payload_duplicates(&members),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_payload_duplicate_student_id_rejected() {
        let members = vec![member("a@uni.edu", Some("S-1")), member("b@uni.edu", Some("S-1"))];
        assert!(matches!(
            check_payload_duplicates(&members),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_payload_distinct_members_accepted() {
        let members = vec![member("a@uni.edu", Some("S-1")), member("b@uni.edu", None)];
        assert!(check_payload_duplicates(&members).is_ok());
    }
}
