//! Profile Model
//!
//! One profile per user account. `cargo` is the role used for route gating.

use serde::{Deserialize, Serialize};

/// Cargo granting user administration
pub const CARGO_ADMIN: &str = "admin";
/// Cargo for delivery couriers
pub const CARGO_COURIER: &str = "entregador";

/// User profile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub user_id: i64,
    /// Display name (email local part by default)
    pub nome: String,
    pub email: String,
    pub avatar: String,
    /// Role name, empty when none was assigned
    pub cargo: String,
}

impl Profile {
    /// Default profile created on first login
    pub fn default_for(user_id: i64, email: &str) -> Self {
        Self {
            user_id,
            nome: display_name_from_email(email),
            email: email.to_string(),
            avatar: String::new(),
            cargo: String::new(),
        }
    }
}

/// Display name derived from an email address: everything before the first `@`.
pub fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("maria.silva@nortegas.com"), "maria.silva");
        assert_eq!(display_name_from_email("no-at-sign"), "no-at-sign");
        assert_eq!(display_name_from_email(""), "");
    }

    #[test]
    fn test_default_profile_has_empty_cargo() {
        let profile = Profile::default_for(7, "joao@example.com");
        assert_eq!(profile.user_id, 7);
        assert_eq!(profile.nome, "joao");
        assert_eq!(profile.avatar, "");
        assert_eq!(profile.cargo, "");
    }
}
