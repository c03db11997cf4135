//! Client-related types shared between server and client
//!
//! Request/response bodies for the auth and user administration API.

use serde::{Deserialize, Serialize};

use crate::models::Profile;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signed-in user as seen by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: i64,
    pub email: String,
    pub nome: String,
    pub avatar: String,
    pub cargo: String,
}

impl From<Profile> for AuthSession {
    fn from(p: Profile) -> Self {
        Self {
            user_id: p.user_id,
            email: p.email,
            nome: p.nome,
            avatar: p.avatar,
            cargo: p.cargo,
        }
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub session: AuthSession,
}

/// Ask for a password reset link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Redeem a password reset token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

// =============================================================================
// User administration DTOs
// =============================================================================

/// Create a staff account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub nome: Option<String>,
    #[serde(default)]
    pub cargo: String,
}

/// Change a user's cargo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCargoRequest {
    pub cargo: String,
}
