//! Owner-facing team and member management

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use clubhub_auth::{AuthUser, EventScope};
use clubhub_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::RegistrationsState;
use crate::domain::entities::TeamWithMembers;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub team_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub leader_name: Option<String>,
    #[validate(email)]
    pub leader_email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub member_name: Option<String>,
    #[validate(email)]
    pub member_email: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub member_student_id: Option<String>,
}

/// GET .../team — owner listing of registered teams
pub async fn list_teams(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let teams = state
        .repos
        .teams
        .list_by_event(event_id, page.skip(), page.limit())
        .await?;

    Ok(Json(teams).into_response())
}

/// GET .../team/{team_id} — team with its members
pub async fn get_team(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, team_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let team = state
        .repos
        .teams
        .find_in_event(event_id, team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;
    let members = state.repos.teams.list_members(team.id).await?;

    Ok(Json(TeamWithMembers { team, members }).into_response())
}

/// PATCH .../team/{team_id}
pub async fn update_team(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, team_id)): Path<(Uuid, Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateTeamRequest>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let mut team = state
        .repos
        .teams
        .find_in_event(event_id, team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if let Some(team_name) = req.team_name {
        team.team_name = team_name;
    }
    if let Some(leader_name) = req.leader_name {
        team.leader_name = leader_name;
    }
    if let Some(leader_email) = req.leader_email {
        team.leader_email = leader_email;
    }

    let updated = state.repos.teams.update(&team).await?;

    Ok(Json(updated).into_response())
}

/// GET .../team/{team_id}/members
pub async fn list_members(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, team_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    // 404 for a team outside this event before touching members
    state
        .repos
        .teams
        .find_in_event(event_id, team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    let members = state.repos.teams.list_members(team_id).await?;

    Ok(Json(members).into_response())
}

/// PATCH .../team/{team_id}/members/{member_id}
///
/// Changing a member's email or student ID re-validates against the
/// per-event uniqueness constraints.
pub async fn update_member(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, team_id, member_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateMemberRequest>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let mut member = state
        .repos
        .teams
        .find_member(team_id, member_id)
        .await?
        .filter(|m| m.event_id == event_id)
        .ok_or_else(|| Error::NotFound("Team member not found".to_string()))?;

    if let Some(member_name) = req.member_name {
        member.member_name = member_name;
    }
    if let Some(member_email) = req.member_email {
        member.member_email = member_email;
    }
    if let Some(member_student_id) = req.member_student_id {
        member.member_student_id = Some(member_student_id);
    }

    let updated = state.repos.teams.update_member(&member).await?;

    Ok(Json(updated).into_response())
}

/// DELETE .../team/{team_id}/members/{member_id}
pub async fn delete_member(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, team_id, member_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    // The member must belong to this event's chain; a team under some
    // other event is a broken link, not a permission failure.
    let member = state
        .repos
        .teams
        .find_member(team_id, member_id)
        .await?
        .filter(|m| m.event_id == event_id)
        .ok_or_else(|| Error::NotFound("Team member not found".to_string()))?;

    state.repos.teams.delete_member(team_id, member.id).await?;

    tracing::info!(member_id = %member_id, team_id = %team_id, "Team member removed");

    Ok(StatusCode::NO_CONTENT.into_response())
}
