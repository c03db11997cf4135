//! Authentication Handlers

use axum::{Extension, Json, extract::State};
use shared::client::{
    AuthSession, LoginRequest, LoginResponse, PasswordResetConfirm, PasswordResetRequest,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::services::accounts;
use crate::utils::{ApiResponse, AppResult, ok_with_message};

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = accounts::login(&state, &req).await?;
    Ok(Json(response))
}

/// Get current session (profile read fresh)
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AuthSession>> {
    let session = accounts::session(&state, user.id, &user.email).await?;
    Ok(Json(session))
}

/// Logout handler (tokens are stateless, the event is only logged)
pub async fn logout(Extension(user): Extension<CurrentUser>) -> Json<ApiResponse<()>> {
    security_log!("INFO", "logout", user_id = user.id, email = user.email.clone());
    tracing::info!(user_id = user.id, "User logged out");
    ok_with_message("Logged out")
}

/// Always answers OK so callers cannot learn which emails exist
pub async fn request_password_reset(
    State(state): State<ServerState>,
    Json(req): Json<PasswordResetRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    accounts::request_password_reset(&state, &req.email).await?;
    Ok(ok_with_message(
        "If the email is registered, a reset link has been sent",
    ))
}

pub async fn confirm_password_reset(
    State(state): State<ServerState>,
    Json(req): Json<PasswordResetConfirm>,
) -> AppResult<Json<ApiResponse<()>>> {
    accounts::confirm_password_reset(&state, &req.token, &req.new_password).await?;
    Ok(ok_with_message("Password updated"))
}
