//! Registration form endpoints, nested under an event

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

use crate::api::middleware::EventsState;
use crate::domain::entities::{Form, FormStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub instructions: Option<String>,
    pub form_content: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub instructions: Option<String>,
    pub form_content: Option<String>,
}

/// POST /api/club/{club_id}/event/{event_id}/form/create
pub async fn create_form(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<CreateFormRequest>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let form = Form::new(event_id, req.title, req.instructions, req.form_content)?;
    let created = state.repos.forms.create(&form).await?;

    tracing::info!(form_id = %created.id, event_id = %event_id, "Form created");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /api/club/{club_id}/event/{event_id}/form/published — public
pub async fn list_published_forms(
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    EventScope::verify(state.repos.pool(), club_id, event_id).await?;

    let forms = state
        .repos
        .forms
        .list_by_status(event_id, FormStatus::Published, page.skip(), page.limit())
        .await?;

    Ok(Json(forms).into_response())
}

/// GET /api/club/{club_id}/event/{event_id}/form/all — owner
pub async fn list_all_forms(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let forms = state
        .repos
        .forms
        .list_all(event_id, page.skip(), page.limit())
        .await?;

    Ok(Json(forms).into_response())
}

/// GET /api/club/{club_id}/event/{event_id}/form/draft|closed — owner
pub async fn list_draft_forms(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid)>,
    page: Query<Pagination>,
) -> Result<Response> {
    list_owned_by_status(auth, state, path, page, FormStatus::Draft).await
}

pub async fn list_closed_forms(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid)>,
    page: Query<Pagination>,
) -> Result<Response> {
    list_owned_by_status(auth, state, path, page, FormStatus::Closed).await
}

async fn list_owned_by_status(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    Query(page): Query<Pagination>,
    status: FormStatus,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let forms = state
        .repos
        .forms
        .list_by_status(event_id, status, page.skip(), page.limit())
        .await?;

    Ok(Json(forms).into_response())
}

/// GET /api/club/{club_id}/event/{event_id}/form/{form_id} — public read
/// through the verified chain
pub async fn get_form(
    State(state): State<EventsState>,
    Path((club_id, event_id, form_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;

    let form = state
        .repos
        .forms
        .find_in_event(event_id, form_id)
        .await?
        .ok_or_else(|| Error::NotFound("Form not found or not part of this event".to_string()))?;

    Ok(Json(form).into_response())
}

/// PATCH /api/club/{club_id}/event/{event_id}/form/{form_id}
pub async fn update_form(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id, form_id)): Path<(Uuid, Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateFormRequest>,
) -> Result<Response> {
    let scope = EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;
    scope.require_owner(&ctx)?;

    let mut form = state
        .repos
        .forms
        .find_in_event(event_id, form_id)
        .await?
        .ok_or_else(|| Error::NotFound("Form not found or not part of this event".to_string()))?;

    if let Some(title) = req.title {
        form.title = title;
    }
    if let Some(instructions) = req.instructions {
        form.instructions = Some(instructions);
    }
    if let Some(form_content) = req.form_content {
        form.form_content = Some(form_content);
    }

    let updated = state.repos.forms.update(&form).await?;

    Ok(Json(updated).into_response())
}

/// DELETE /api/club/{club_id}/event/{event_id}/form/{form_id} — cascades
/// to responses and registrations
pub async fn delete_form(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id, form_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    let scope = EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;
    scope.require_owner(&ctx)?;

    state.repos.forms.delete(form_id).await?;

    tracing::info!(form_id = %form_id, event_id = %event_id, "Form deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// PATCH /api/club/{club_id}/event/{event_id}/form/{form_id}/publish
pub async fn publish_form(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Form::publish, "Form published").await
}

/// PATCH /api/club/{club_id}/event/{event_id}/form/{form_id}/draft
pub async fn redraft_form(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Form::redraft, "Form re-drafted").await
}

/// PATCH /api/club/{club_id}/event/{event_id}/form/{form_id}/close
pub async fn close_form(
    auth: AuthUser,
    state: State<EventsState>,
    path: Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Form::close, "Form closed").await
}

async fn transition(
    AuthUser(ctx): AuthUser,
    State(state): State<EventsState>,
    Path((club_id, event_id, form_id)): Path<(Uuid, Uuid, Uuid)>,
    apply: fn(&mut Form) -> Result<()>,
    log_line: &'static str,
) -> Result<Response> {
    let scope = EventScope::verify_form(state.repos.pool(), club_id, event_id, form_id).await?;
    scope.require_owner(&ctx)?;

    let mut form = state
        .repos
        .forms
        .find_in_event(event_id, form_id)
        .await?
        .ok_or_else(|| Error::NotFound("Form not found or not part of this event".to_string()))?;

    apply(&mut form)?;
    let updated = state.repos.forms.update(&form).await?;

    tracing::info!(form_id = %updated.id, status = %updated.status, "{}", log_line);

    Ok((StatusCode::CREATED, Json(updated)).into_response())
}
