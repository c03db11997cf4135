//! Error vocabulary shared by the server and its clients
//!
//! Services return [`AppError`]; axum turns it into an [`ApiResponse`] with
//! the status from [`ErrorCode::http_status`].
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::OrderCustomerIncomplete).with_detail("field", "phone");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(4010));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
