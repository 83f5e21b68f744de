//! Shared state for the events domain routes

use axum::extract::FromRef;

use clubhub_auth::AuthBackend;

use crate::repository::EventsRepositories;

#[derive(Clone)]
pub struct EventsState {
    pub repos: EventsRepositories,
    pub auth: AuthBackend,
}

impl EventsState {
    pub fn new(repos: EventsRepositories, auth: AuthBackend) -> Self {
        Self { repos, auth }
    }
}

impl FromRef<EventsState> for AuthBackend {
    fn from_ref(state: &EventsState) -> Self {
        state.auth.clone()
    }
}
