//! Shared types for the gas order service
//!
//! Domain models, error types, response envelopes and live-feed payloads
//! used by the server and by any HTTP client of it.

pub mod client;
pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::SyncPayload;
