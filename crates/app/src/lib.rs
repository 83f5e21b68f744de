//! Composition root: wires the domain routers, shared state and HTTP
//! middleware into one axum application.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use clubhub_auth::{AuthBackend, AuthConfig};
use clubhub_clubs::{ClubsRepositories, ClubsState};
use clubhub_common::Config;
use clubhub_events::{EventsRepositories, EventsState};
use clubhub_registrations::{RegistrationsRepositories, RegistrationsState};

/// Build the full application router.
///
/// Every domain router is mounted under `/api`; the health probe lives
/// at the root.
pub fn create_app(pool: PgPool, config: Arc<Config>) -> Router {
    let auth = AuthBackend::new(
        pool.clone(),
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_expiry_minutes: config.token_expiry_minutes,
        },
    );

    let clubs = clubhub_clubs::routes(ClubsState::new(
        ClubsRepositories::new(pool.clone()),
        auth.clone(),
        config.clone(),
    ));
    let events = clubhub_events::routes(EventsState::new(
        EventsRepositories::new(pool.clone()),
        auth.clone(),
    ));
    let registrations = clubhub_registrations::routes(RegistrationsState::new(
        RegistrationsRepositories::new(pool),
        auth,
    ));

    let api = clubs.merge(events).merge(registrations);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Browser clients send the session cookie cross-origin, so the CORS
/// policy names the configured frontend origin explicitly rather than
/// using a wildcard.
fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match config
        .frontend_url
        .as_deref()
        .and_then(|url| url.parse::<HeaderValue>().ok())
    {
        Some(origin) => layer.allow_origin(origin),
        None => layer,
    }
}
