//! User administration handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::{CreateUserRequest, UpdateCargoRequest};
use shared::message::{action, resource};
use shared::models::Profile;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, profile as profile_repo};
use crate::security_log;
use crate::services::accounts;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_text_len};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/admin/users - 所有账号资料
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Profile>>> {
    let profiles = profile_repo::find_all(&state.db.pool).await?;
    Ok(Json(profiles))
}

/// POST /api/admin/users - 创建员工账号
pub async fn create(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<Profile>> {
    let profile = accounts::create_account(
        &state,
        &req.email,
        &req.password,
        req.nome.as_deref(),
        &req.cargo,
    )
    .await?;
    tracing::info!(admin_id = admin.id, user_id = profile.user_id, "Staff account created");
    Ok(Json(profile))
}

/// PUT /api/admin/users/{id}/cargo - 设置 cargo
///
/// Takes effect on the user's next login; `/api/auth/me` shows it at once.
pub async fn update_cargo(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateCargoRequest>,
) -> AppResult<Json<Profile>> {
    let cargo = req.cargo.trim();
    validate_text_len(cargo, "cargo", MAX_SHORT_TEXT_LEN)?;

    let profile = match profile_repo::update_cargo(&state.db.pool, user_id, cargo).await {
        Ok(p) => p,
        Err(RepoError::NotFound(_)) => {
            return Err(AppError::new(ErrorCode::ProfileNotFound).with_detail("user_id", user_id));
        }
        Err(e) => return Err(e.into()),
    };

    security_log!(
        "INFO",
        "cargo_changed",
        admin_id = admin.id,
        user_id = user_id,
        cargo = profile.cargo.clone()
    );
    state
        .broadcast_sync(resource::PROFILE, action::UPDATED, &user_id.to_string(), Some(&profile))
        .await;
    Ok(Json(profile))
}
