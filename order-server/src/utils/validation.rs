//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, customer, profile display name
pub const MAX_NAME_LEN: usize = 200;

/// Order notes, change amount text
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, weight label, cargo, CEP, payment method
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length for new and reset passwords
pub const MIN_PASSWORD_LEN: usize = 6;

/// Address fields
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a string (possibly empty) is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Prices must be finite and non-negative.
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{field} must be a non-negative number"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Rough email shape check: `local@domain` with a dot in the domain.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let valid = value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "email is not a valid address",
        ));
    }
    Ok(())
}

/// Password length bounds for account creation and reset.
pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("password must have at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if value.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Botijão", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0.0, "pickup_price").is_ok());
        assert!(validate_price(105.5, "delivery_price").is_ok());
        let err = validate_price(-1.0, "pickup_price").unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        assert!(validate_price(f64::NAN, "pickup_price").is_err());
        assert!(validate_price(f64::INFINITY, "pickup_price").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("maria@nortegas.com").is_ok());
        assert!(validate_email("maria@localhost").is_err());
        assert!(validate_email("@nortegas.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            validate_password("12345").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert!(validate_password(&"a".repeat(129)).is_err());
    }
}
