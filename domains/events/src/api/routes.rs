//! Route table for the events domain
//!
//! All routes live under `/api/club/{club_id}/event`. Static segments
//! (`create`, `published`, ...) take precedence over `{event_id}`.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::handlers::{events, forms};
use crate::api::middleware::EventsState;

/// Routes mounted under `/api`
pub fn routes(state: EventsState) -> Router {
    Router::new()
        // Events
        .route("/club/{club_id}/event/create", post(events::create_event))
        .route(
            "/club/{club_id}/event/published",
            get(events::list_published_events),
        )
        .route("/club/{club_id}/event/all", get(events::list_all_events))
        .route("/club/{club_id}/event/draft", get(events::list_draft_events))
        .route(
            "/club/{club_id}/event/closed",
            get(events::list_closed_events),
        )
        .route(
            "/club/{club_id}/event/cancelled",
            get(events::list_cancelled_events),
        )
        .route("/club/{club_id}/event/{event_id}", get(events::get_event))
        .route(
            "/club/{club_id}/event/{event_id}",
            patch(events::update_event),
        )
        .route(
            "/club/{club_id}/event/{event_id}",
            delete(events::delete_event),
        )
        .route(
            "/club/{club_id}/event/{event_id}/publish",
            patch(events::publish_event),
        )
        .route(
            "/club/{club_id}/event/{event_id}/close",
            patch(events::close_event),
        )
        .route(
            "/club/{club_id}/event/{event_id}/cancel",
            patch(events::cancel_event),
        )
        // Forms
        .route(
            "/club/{club_id}/event/{event_id}/form/create",
            post(forms::create_form),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/published",
            get(forms::list_published_forms),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/all",
            get(forms::list_all_forms),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/draft",
            get(forms::list_draft_forms),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/closed",
            get(forms::list_closed_forms),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}",
            get(forms::get_form),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}",
            patch(forms::update_form),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}",
            delete(forms::delete_form),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}/publish",
            patch(forms::publish_form),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}/draft",
            patch(forms::redraft_form),
        )
        .route(
            "/club/{club_id}/event/{event_id}/form/{form_id}/close",
            patch(forms::close_form),
        )
        .with_state(state)
}
