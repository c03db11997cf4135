//! Numeric error codes shared by server and clients
//!
//! The leading digit groups codes by domain, see [`super::ErrorCategory`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code, serialized as its bare `u16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx general
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    /// Query or path value that does not parse (e.g. unknown status filter)
    InvalidFormat = 6,

    // 1xxx auth
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    AccountDisabled = 1007,
    /// Unknown, used or expired password reset token
    ResetTokenInvalid = 1010,
    PasswordTooShort = 1011,

    // 2xxx permission
    /// Cargo does not grant the route
    PermissionDenied = 2001,

    // 4xxx orders
    OrderNotFound = 4001,
    OrderEmpty = 4007,
    /// `advance` on a delivered order
    OrderAlreadyDelivered = 4008,
    /// Every drawn order number was taken
    OrderNumberExhausted = 4009,
    OrderCustomerIncomplete = 4010,

    // 6xxx catalog
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,

    // 8xxx accounts
    EmailAlreadyExists = 8002,
    ProfileNotFound = 8003,

    // 9xxx system
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 24] = [
        Self::Success,
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::InvalidFormat,
        Self::NotAuthenticated,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::AccountDisabled,
        Self::ResetTokenInvalid,
        Self::PasswordTooShort,
        Self::PermissionDenied,
        Self::OrderNotFound,
        Self::OrderEmpty,
        Self::OrderAlreadyDelivered,
        Self::OrderNumberExhausted,
        Self::OrderCustomerIncomplete,
        Self::ProductNotFound,
        Self::ProductInvalidPrice,
        Self::EmailAlreadyExists,
        Self::ProfileNotFound,
        Self::InternalError,
        Self::DatabaseError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default message, used when the error carries no custom text
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidFormat => "Invalid format",

            Self::NotAuthenticated => "User is not authenticated",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Authentication token has expired",
            Self::TokenInvalid => "Authentication token is invalid",
            Self::AccountDisabled => "Account is disabled",
            Self::ResetTokenInvalid => "Password reset token is invalid or expired",
            Self::PasswordTooShort => "Password is too short",

            Self::PermissionDenied => "Permission denied",

            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no products",
            Self::OrderAlreadyDelivered => "Order has already been delivered",
            Self::OrderNumberExhausted => "Could not generate a unique order number",
            Self::OrderCustomerIncomplete => "Customer name and phone are required",

            Self::ProductNotFound => "Product not found",
            Self::ProductInvalidPrice => "Product has invalid price",

            Self::EmailAlreadyExists => "Email is already registered",
            Self::ProfileNotFound => "Profile not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` that names no [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_parses_back() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialized_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::OrderNotFound).unwrap(), "4001");
        let code: ErrorCode = serde_json::from_str("4009").unwrap();
        assert_eq!(code, ErrorCode::OrderNumberExhausted);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(ErrorCode::OrderEmpty.to_string(), "4007");
    }
}
