//! Shared state for the clubs domain routes

use std::sync::Arc;

use axum::extract::FromRef;

use clubhub_auth::AuthBackend;
use clubhub_common::Config;

use crate::repository::ClubsRepositories;

#[derive(Clone)]
pub struct ClubsState {
    pub repos: ClubsRepositories,
    pub auth: AuthBackend,
    pub config: Arc<Config>,
}

impl ClubsState {
    pub fn new(repos: ClubsRepositories, auth: AuthBackend, config: Arc<Config>) -> Self {
        Self {
            repos,
            auth,
            config,
        }
    }
}

impl FromRef<ClubsState> for AuthBackend {
    fn from_ref(state: &ClubsState) -> Self {
        state.auth.clone()
    }
}
