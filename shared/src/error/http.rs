//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound | Self::OrderNotFound | Self::ProductNotFound | Self::ProfileNotFound => {
                StatusCode::NOT_FOUND
            }

            Self::AlreadyExists | Self::EmailAlreadyExists | Self::OrderAlreadyDelivered => {
                StatusCode::CONFLICT
            }

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // Transient: a retry draws new numbers
            Self::OrderNumberExhausted => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::ValidationFailed
            | Self::InvalidFormat
            | Self::ResetTokenInvalid
            | Self::PasswordTooShort
            | Self::OrderEmpty
            | Self::OrderCustomerIncomplete
            | Self::ProductInvalidPrice => StatusCode::BAD_REQUEST,
        }
    }
}
