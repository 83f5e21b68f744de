//! Shared state for the registrations domain routes

use axum::extract::FromRef;

use clubhub_auth::AuthBackend;

use crate::repository::RegistrationsRepositories;

#[derive(Clone)]
pub struct RegistrationsState {
    pub repos: RegistrationsRepositories,
    pub auth: AuthBackend,
}

impl RegistrationsState {
    pub fn new(repos: RegistrationsRepositories, auth: AuthBackend) -> Self {
        Self { repos, auth }
    }
}

impl FromRef<RegistrationsState> for AuthBackend {
    fn from_ref(state: &RegistrationsState) -> Self {
        state.auth.clone()
    }
}
