//! Storefront API 模块
//!
//! Customer facing and unauthenticated: store info, the catalog and
//! checkout.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/storefront", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/info", get(handler::info))
        .route("/products", get(handler::products))
        .route("/orders", post(handler::checkout))
}
