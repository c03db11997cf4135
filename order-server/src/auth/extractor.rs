//! `CurrentUser` extraction from the Authorization header

use axum::{extract::FromRequestParts, http::request::Parts};
use http::{HeaderMap, Uri};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Validate `Authorization: Bearer <jwt>` and build the caller.
///
/// Failures are written to the security log with the request uri.
pub fn authenticate(jwt: &JwtService, headers: &HeaderMap, uri: &Uri) -> Result<CurrentUser, AppError> {
    let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", uri = uri.to_string());
        return Err(AppError::unauthorized());
    };
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = jwt.validate_token(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri.to_string());
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))
}

/// Reuses the user injected by `require_auth`, otherwise validates the
/// Bearer token itself.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let user = authenticate(&state.get_jwt_service(), &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
