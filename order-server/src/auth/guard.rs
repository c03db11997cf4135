//! Route guard rule
//!
//! A user may enter a gated route when any of these holds:
//! the user is the configured admin account, the route names no cargo,
//! or the user's cargo equals the required one.

use super::CurrentUser;

/// Configured admin account id, injected by `require_auth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUserId(pub Option<i64>);

pub fn access_allowed(
    user: &CurrentUser,
    required_cargo: Option<&str>,
    admin_user_id: Option<i64>,
) -> bool {
    if admin_user_id == Some(user.id) {
        return true;
    }
    match required_cargo {
        None | Some("") => true,
        Some(cargo) => user.has_cargo(cargo),
    }
}
