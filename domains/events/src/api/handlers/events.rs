//! Event endpoints: creation, listings by status, edits and lifecycle
//! transitions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use clubhub_auth::{AuthUser, ClubScope, EventScope};
use clubhub_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::EventsState;
use crate::domain::entities::{Event, EventStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 80))]
    pub slug: String,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub poster_url: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub poster_url: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
}

/// POST /api/club/{club_id}/event/create
pub async fn create_event(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path(club_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<Response> {
    ClubScope::verify_owned(state.repos.pool(), &ctx, club_id).await?;

    let event = Event::new(
        club_id,
        req.title,
        req.slug,
        req.event_type,
        req.description,
        req.poster_url,
        req.start_time,
        req.end_time,
        req.registration_deadline,
        req.location,
        req.max_participants,
    )?;

    let created = state.repos.events.create(&event).await?;

    tracing::info!(event_id = %created.id, club_id = %club_id, "Event created");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /api/club/{club_id}/event/published — public listing
pub async fn list_published_events(
    State(state): State<EventsState>,
    Path(club_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    ClubScope::verify(state.repos.pool(), club_id).await?;

    let events = state
        .repos
        .events
        .list_by_status(club_id, EventStatus::Published, page.skip(), page.limit())
        .await?;

    Ok(Json(events).into_response())
}

/// GET /api/club/{club_id}/event/all — owner listing across statuses
pub async fn list_all_events(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path(club_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    ClubScope::verify_owned(state.repos.pool(), &ctx, club_id).await?;

    let events = state
        .repos
        .events
        .list_all(club_id, page.skip(), page.limit())
        .await?;

    Ok(Json(events).into_response())
}

/// GET /api/club/{club_id}/event/draft|closed|cancelled — owner listings
pub async fn list_draft_events(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<Uuid>,
    page: Query<Pagination>,
) -> Result<Response> {
    list_owned_by_status(auth, state, path, page, EventStatus::Draft).await
}

pub async fn list_closed_events(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<Uuid>,
    page: Query<Pagination>,
) -> Result<Response> {
    list_owned_by_status(auth, state, path, page, EventStatus::Closed).await
}

pub async fn list_cancelled_events(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<Uuid>,
    page: Query<Pagination>,
) -> Result<Response> {
    list_owned_by_status(auth, state, path, page, EventStatus::Cancelled).await
}

async fn list_owned_by_status(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path(club_id): Path<Uuid>,
    Query(page): Query<Pagination>,
    status: EventStatus,
) -> Result<Response> {
    ClubScope::verify_owned(state.repos.pool(), &ctx, club_id).await?;

    let events = state
        .repos
        .events
        .list_by_status(club_id, status, page.skip(), page.limit())
        .await?;

    Ok(Json(events).into_response())
}

/// GET /api/club/{club_id}/event/{event_id} — public read through the
/// verified chain
pub async fn get_event(
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify(state.repos.pool(), club_id, event_id).await?;

    let event = state
        .repos
        .events
        .find_in_club(club_id, event_id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found or not part of this club".to_string()))?;

    Ok(Json(event).into_response())
}

/// PATCH /api/club/{club_id}/event/{event_id}
pub async fn update_event(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let mut event = state
        .repos
        .events
        .find_in_club(club_id, event_id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found or not part of this club".to_string()))?;

    if let Some(title) = req.title {
        event.title = title;
    }
    if let Some(event_type) = req.event_type {
        event.event_type = Some(event_type);
    }
    if let Some(description) = req.description {
        event.description = Some(description);
    }
    if let Some(poster_url) = req.poster_url {
        event.poster_url = Some(poster_url);
    }
    if let Some(start_time) = req.start_time {
        event.start_time = start_time;
    }
    if let Some(end_time) = req.end_time {
        event.end_time = end_time;
    }
    if let Some(deadline) = req.registration_deadline {
        event.registration_deadline = Some(deadline);
    }
    if let Some(location) = req.location {
        event.location = Some(location);
    }
    if let Some(max) = req.max_participants {
        if max < 1 {
            return Err(Error::Validation(
                "Maximum participants must be at least 1".to_string(),
            ));
        }
        event.max_participants = Some(max);
    }
    if event.end_time < event.start_time {
        return Err(Error::Validation(
            "Event end time must not precede its start time".to_string(),
        ));
    }

    let updated = state.repos.events.update(&event).await?;

    Ok(Json(updated).into_response())
}

/// DELETE /api/club/{club_id}/event/{event_id} — cascades to forms,
/// teams, responses and registrations
pub async fn delete_event(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    state.repos.events.delete(event_id).await?;

    tracing::info!(event_id = %event_id, club_id = %club_id, "Event deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// PATCH /api/club/{club_id}/event/{event_id}/publish
pub async fn publish_event(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Event::publish, "Event published").await
}

/// PATCH /api/club/{club_id}/event/{event_id}/close
pub async fn close_event(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Event::close, "Event closed").await
}

/// PATCH /api/club/{club_id}/event/{event_id}/cancel
pub async fn cancel_event(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Event::cancel, "Event cancelled").await
}

async fn transition(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    apply: fn(&mut Event) -> Result<()>,
    log_line: &'static str,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let mut event = state
        .repos
        .events
        .find_in_club(club_id, event_id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found or not part of this club".to_string()))?;

    apply(&mut event)?;
    let updated = state.repos.events.update(&event).await?;

    tracing::info!(event_id = %updated.id, status = %updated.status, "{}", log_line);

    Ok((StatusCode::CREATED, Json(updated)).into_response())
}
