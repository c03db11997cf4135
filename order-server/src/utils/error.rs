//! Unified error handling
//!
//! The error vocabulary lives in `shared::error` so clients decode the same
//! codes. This module re-exports it and adds response helpers for handlers.
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::new(ErrorCode::OrderNotFound))
//!
//! // 返回无数据的成功响应
//! Ok(ok_with_message("Logged out"))
//! ```

use axum::Json;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Success envelope carrying only a message
pub fn ok_with_message(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(message))
}
