//! User management endpoints and self-service password change

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use clubhub_auth::{AdminUser, AuthUser};
use clubhub_common::{hash_password, verify_password, Error, Pagination, Result, ValidatedJson};

use crate::api::handlers::UserProfile;
use crate::api::middleware::ClubsState;
use crate::domain::entities::UserRole;
use crate::repository::set_user_role_tx;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub university_id: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    #[validate(length(min = 1))]
    pub new_password_confirm: String,
}

/// GET /api/users — admin listing, paginated
pub async fn list_users(
    AdminUser(_): AdminUser,
    State(state): State<ClubsState>,
    Query(page): Query<Pagination>,
) -> Result<Response> {
    let users = state.repos.users.list(page.skip(), page.limit()).await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();

    Ok(Json(profiles).into_response())
}

/// PATCH /api/users/{id}
///
/// Callers may update their own profile; admins may update anyone.
/// Role changes are admin-only.
pub async fn update_user(
    AuthUser(ctx): AuthUser,
    State(state): State<ClubsState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Response> {
    if ctx.user.id != user_id && !ctx.is_admin() {
        return Err(Error::Authorization(
            "You may only update your own profile".to_string(),
        ));
    }
    if req.role.is_some() && !ctx.is_admin() {
        return Err(Error::Authorization(
            "Only an admin may change roles".to_string(),
        ));
    }

    let mut user = state
        .repos
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if let Some(name) = req.name {
        user.name = name;
    }
    if let Some(email) = req.email {
        user.email = email;
    }
    if let Some(university_id) = req.university_id {
        user.university_id = Some(university_id);
    }

    // Role changes go through the transactional helper alongside the
    // profile update so neither lands without the other.
    let updated = if let Some(role) = req.role {
        let mut tx = state.repos.begin().await?;
        sqlx::query(
            "UPDATE users SET name = $2, email = $3, university_id = $4, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.university_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| clubhub_common::conflict_on_unique(e, "A user with this email already exists"))?;
        let updated = set_user_role_tx(&mut tx, user.id, role).await?;
        tx.commit().await.map_err(Error::Database)?;
        updated
    } else {
        state.repos.users.update(&user).await?
    };

    tracing::info!(user_id = %updated.id, role = %updated.role, "User updated");

    Ok(Json(UserProfile::from(updated)).into_response())
}

/// POST /api/account/password — change the caller's own password
pub async fn change_password(
    AuthUser(ctx): AuthUser,
    State(state): State<ClubsState>,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Response> {
    if req.new_password != req.new_password_confirm {
        return Err(Error::Validation(
            "Password confirmation does not match".to_string(),
        ));
    }

    let mut user = state
        .repos
        .users
        .find_by_id(ctx.user.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !verify_password(&req.current_password, &user.password_hash) {
        return Err(Error::Authentication(
            "Current password is incorrect".to_string(),
        ));
    }
    if req.new_password == req.current_password {
        return Err(Error::Conflict(
            "New password must differ from the current password".to_string(),
        ));
    }

    user.password_hash = hash_password(&req.new_password);
    state.repos.users.update(&user).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(Json(json!({ "message": "Password updated" })).into_response())
}
