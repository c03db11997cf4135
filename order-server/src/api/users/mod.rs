//! User administration API
//!
//! Every route here requires cargo `admin` (or the configured admin id).

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use shared::models::CARGO_ADMIN;

use crate::auth::require_cargo;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}/cargo", put(handler::update_cargo))
        .layer(middleware::from_fn(require_cargo(CARGO_ADMIN)))
}
