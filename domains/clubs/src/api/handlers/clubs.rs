//! Club endpoints: creation, public browsing, owner updates, and the
//! admin approval queue

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use clubhub_auth::{AdminUser, AuthUser};
use clubhub_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::ClubsState;
use crate::domain::entities::{Club, ClubStatus};
use crate::repository::approve_club_tx;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClubRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub slug: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[validate(url)]
    pub banner_url: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[validate(url)]
    pub banner_url: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

/// POST /api/club/create
///
/// One club per owner; the unique index on `created_by` is the
/// authoritative guard, so a concurrent second create surfaces as 409.
pub async fn create_club(
    AuthUser(ctx): AuthUser,
    State(state): State<ClubsState>,
    ValidatedJson(req): ValidatedJson<CreateClubRequest>,
) -> Result<Response> {
    let club = Club::new(
        req.name,
        req.slug,
        req.description,
        req.logo_url,
        req.banner_url,
        req.website,
        ctx.user.id,
    )?;

    let created = state.repos.clubs.create(&club).await?;

    tracing::info!(club_id = %created.id, slug = %created.slug, "Club created");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /api/clubs — public listing of active clubs
pub async fn list_active_clubs(
    State(state): State<ClubsState>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    let clubs = state
        .repos
        .clubs
        .list_by_status(ClubStatus::Active, page.skip(), page.limit())
        .await?;

    Ok(Json(clubs).into_response())
}

/// GET /api/clubs/all — admin listing across all statuses
pub async fn list_all_clubs(
    AdminUser(_): AdminUser,
    State(state): State<ClubsState>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    let clubs = state.repos.clubs.list_all(page.skip(), page.limit()).await?;

    Ok(Json(clubs).into_response())
}

/// GET /api/clubs/pending — admin approval queue
pub async fn list_pending_clubs(
    AdminUser(_): AdminUser,
    State(state): State<ClubsState>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    let clubs = state
        .repos
        .clubs
        .list_by_status(ClubStatus::Pending, page.skip(), page.limit())
        .await?;

    Ok(Json(clubs).into_response())
}

/// GET /api/clubs/{slug} — public club profile
pub async fn get_club(
    State(state): State<ClubsState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let club = state
        .repos
        .clubs
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

    Ok(Json(club).into_response())
}

/// PATCH /api/clubs/{slug} — owner (or admin) profile update
pub async fn update_club(
    AuthUser(ctx): AuthUser,
    State(state): State<ClubsState>,
    Path(slug): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateClubRequest>,
) -> Result<Response> {
    let mut club = state
        .repos
        .clubs
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

    if !ctx.owns(club.created_by) {
        return Err(Error::Authorization(
            "You are not the owner of the club".to_string(),
        ));
    }

    if let Some(name) = req.name {
        club.name = name;
    }
    if let Some(description) = req.description {
        club.description = Some(description);
    }
    if let Some(logo_url) = req.logo_url {
        club.logo_url = Some(logo_url);
    }
    if let Some(banner_url) = req.banner_url {
        club.banner_url = Some(banner_url);
    }
    if let Some(website) = req.website {
        club.website = Some(website);
    }

    let updated = state.repos.clubs.update(&club).await?;

    Ok(Json(updated).into_response())
}

/// DELETE /api/clubs/{slug} — owner (or admin) removal, cascades to
/// events, forms, teams and registrations
pub async fn delete_club(
    AuthUser(ctx): AuthUser,
    State(state): State<ClubsState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let club = state
        .repos
        .clubs
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

    if !ctx.owns(club.created_by) {
        return Err(Error::Authorization(
            "You are not the owner of the club".to_string(),
        ));
    }

    state.repos.clubs.delete(club.id).await?;

    tracing::info!(club_id = %club.id, slug = %club.slug, "Club deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// PATCH /api/clubs/{slug}/approve
///
/// Activates the club and promotes its owner in one transaction.
pub async fn approve_club(
    AdminUser(admin): AdminUser,
    State(state): State<ClubsState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let club = state
        .repos
        .clubs
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

    let mut tx = state.repos.begin().await?;
    let approved = approve_club_tx(&mut tx, club.id, admin.user.id).await?;
    tx.commit().await.map_err(Error::Database)?;

    tracing::info!(club_id = %approved.id, admin_id = %admin.user.id, "Club approved");

    Ok((StatusCode::CREATED, Json(approved)).into_response())
}

/// PATCH /api/clubs/{slug}/reject
pub async fn reject_club(
    AdminUser(admin): AdminUser,
    State(state): State<ClubsState>,
    Path(slug): Path<String>,
) -> Result<Response> {
    let mut club = state
        .repos
        .clubs
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Club not found".to_string()))?;

    club.reject(admin.user.id);
    let rejected = state.repos.clubs.update(&club).await?;

    tracing::info!(club_id = %rejected.id, admin_id = %admin.user.id, "Club rejected");

    Ok((StatusCode::CREATED, Json(rejected)).into_response())
}
