//! Route table for the clubs domain

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::handlers::{auth, clubs, users};
use crate::api::middleware::ClubsState;

/// Routes mounted under `/api`
pub fn routes(state: ClubsState) -> Router {
    Router::new()
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/whoami", get(auth::whoami))
        // Account self-service
        .route("/account/password", post(users::change_password))
        // Admin user management
        .route("/users", get(users::list_users))
        .route("/users/{id}", patch(users::update_user))
        // Clubs
        .route("/club/create", post(clubs::create_club))
        .route("/clubs", get(clubs::list_active_clubs))
        .route("/clubs/all", get(clubs::list_all_clubs))
        .route("/clubs/pending", get(clubs::list_pending_clubs))
        .route("/clubs/{slug}", get(clubs::get_club))
        .route("/clubs/{slug}", patch(clubs::update_club))
        .route("/clubs/{slug}", delete(clubs::delete_club))
        .route("/clubs/{slug}/approve", patch(clubs::approve_club))
        .route("/clubs/{slug}/reject", patch(clubs::reject_club))
        .with_state(state)
}
