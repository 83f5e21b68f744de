//! Owner-facing registration management: listings, detail reads,
//! status transitions, payment tracking and statistics

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use clubhub_auth::{AuthUser, EventScope};
use clubhub_common::{Error, Pagination, Result};

use crate::api::middleware::RegistrationsState;
use crate::domain::entities::{PaymentStatus, Registration};

/// GET .../registrations — owner listing
pub async fn list_registrations(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let registrations = state
        .repos
        .registrations
        .list_by_event(event_id, page.skip(), page.limit())
        .await?;

    Ok(Json(registrations).into_response())
}

/// GET .../registrations/stats — owner statistics
pub async fn registration_stats(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let stats = state.repos.registrations.stats(event_id).await?;

    Ok(Json(stats).into_response())
}

/// GET .../registrations/{id} — owner detail read (registration + team
/// with members + form response)
pub async fn get_registration(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, registration_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let detail = state
        .repos
        .registrations
        .find_detail(event_id, registration_id)
        .await?
        .ok_or_else(|| Error::NotFound("Registration not found".to_string()))?;

    Ok(Json(detail).into_response())
}

/// PATCH .../registrations/{id}/confirm
pub async fn confirm_registration(
    auth: AuthUser,
    state: State<RegistrationsState>,
    path: Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Registration::confirm, "Registration confirmed").await
}

/// PATCH .../registrations/{id}/cancel
pub async fn cancel_registration(
    auth: AuthUser,
    state: State<RegistrationsState>,
    path: Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response> {
    transition(auth, state, path, Registration::cancel, "Registration cancelled").await
}

/// PATCH .../registrations/{id}/payment/{status}
///
/// `status` must be one of `unpaid`, `paid`, `refunded`. Marking `paid`
/// mints a fresh ticket code.
pub async fn set_payment_status(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, registration_id, status)): Path<(Uuid, Uuid, Uuid, String)>,
) -> Result<Response> {
    let payment_status: PaymentStatus = status.parse()?;

    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let mut registration = state
        .repos
        .registrations
        .find_in_event(event_id, registration_id)
        .await?
        .ok_or_else(|| Error::NotFound("Registration not found".to_string()))?;

    registration.set_payment(payment_status);
    let updated = state.repos.registrations.update(&registration).await?;

    tracing::info!(
        registration_id = %updated.id,
        payment_status = %updated.payment_status,
        "Payment status updated"
    );

    Ok((StatusCode::CREATED, Json(updated)).into_response())
}

async fn transition(
    AuthUser(ctx): AuthUser,
    State(state): State<RegistrationsState>,
    Path((club_id, event_id, registration_id)): Path<(Uuid, Uuid, Uuid)>,
    apply: fn(&mut Registration) -> Result<()>,
    log_line: &'static str,
) -> Result<Response> {
    EventScope::verify_owned(state.repos.pool(), &ctx, club_id, event_id).await?;

    let mut registration = state
        .repos
        .registrations
        .find_in_event(event_id, registration_id)
        .await?
        .ok_or_else(|| Error::NotFound("Registration not found".to_string()))?;

    apply(&mut registration)?;
    let updated = state.repos.registrations.update(&registration).await?;

    tracing::info!(registration_id = %updated.id, status = %updated.status, "{}", log_line);

    Ok((StatusCode::CREATED, Json(updated)).into_response())
}
