//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/login, /api/auth/password-reset*: public
/// - /api/auth/me, /api/auth/logout: auth handled by the global require_auth middleware
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/password-reset", post(handler::request_password_reset))
        .route(
            "/api/auth/password-reset/confirm",
            post(handler::confirm_password_reset),
        )
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/logout", post(handler::logout))
}
