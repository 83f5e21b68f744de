//! Route table for the registrations domain
//!
//! Everything lives under `/api/club/{club_id}/event/{event_id}`. The
//! static `stats` segment takes precedence over `{registration_id}`.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::handlers::{registrations, submissions, teams};
use crate::api::middleware::RegistrationsState;

/// Routes mounted under `/api`
pub fn routes(state: RegistrationsState) -> Router {
    Router::new()
        // Public submission + owner form-response reads
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}/form-response/create",
            post(submissions::create_submission),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}/form-response",
            get(submissions::list_form_responses),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}/form-response/{response_id}",
            get(submissions::get_form_response),
        )
        // Registrations
        .route(
            "/club/{club_id}/event/{event_id}/registrations",
            get(registrations::list_registrations),
        )
        .route(
            "/club/{club_id}/event/{event_id}/registrations/stats",
            get(registrations::registration_stats),
        )
        .route(
            "/club/{club_id}/event/{event_id}/registrations/{registration_id}",
            get(registrations::get_registration),
        )
        .route(
            "/club/{club_id}/event/{event_id}/registrations/{registration_id}/confirm",
            patch(registrations::confirm_registration),
        )
        .route(
            "/club/{club_id}/event/{event_id}/registrations/{registration_id}/cancel",
            patch(registrations::cancel_registration),
        )
        .route(
            "/club/{club_id}/event/{event_id}/registrations/{registration_id}/payment/{status}",
            patch(registrations::set_payment_status),
        )
        // Teams
        .route(
            "/club/{club_id}/event/{event_id}/team",
            get(teams::list_teams),
        )
        .route(
            "/club/{club_id}/event/{event_id}/team/{team_id}",
            get(teams::get_team),
        )
        .route(
            "/club/{club_id}/event/{event_id}/team/{team_id}",
            patch(teams::update_team),
        )
        .route(
            "/club/{club_id}/event/{event_id}/team/{team_id}/members",
            get(teams::list_members),
        )
        .route(
            "/club/{club_id}/event/{event_id}/team/{team_id}/members/{member_id}",
            patch(teams::update_member),
        )
        .route(
            "/club/{club_id}/event/{event_id}/team/{team_id}/members/{member_id}",
            delete(teams::delete_member),
        )
        .with_state(state)
}
