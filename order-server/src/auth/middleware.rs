//! 认证中间件
//!
//! 为 JWT 认证和 cargo 授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::guard::{AdminUserId, access_allowed};
use crate::auth::CurrentUser;
use crate::auth::extractor::authenticate;
use crate::core::ServerState;
use crate::security_log;

/// API routes reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &[
    "/api/auth/login",
    "/api/auth/password-reset",
    "/api/auth/password-reset/confirm",
];

/// Public API prefixes (customer facing storefront)
const PUBLIC_API_PREFIXES: &[&str] = &["/api/storefront/"];

pub fn is_public_api_route(path: &str) -> bool {
    PUBLIC_API_ROUTES.contains(&path) || PUBLIC_API_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 和 [`AdminUserId`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health`)
/// - 登录、密码重置、`/api/storefront/*`
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state.get_jwt_service(), req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    req.extensions_mut()
        .insert(AdminUserId(state.config.admin_user_id));
    Ok(next.run(req).await)
}

/// Cargo 检查中间件 - 要求特定 cargo
///
/// Applies [`access_allowed`]: the configured admin id always passes.
///
/// ```ignore
/// Router::new()
///     .route("/", get(handler::list))
///     .layer(middleware::from_fn(require_cargo(CARGO_ADMIN)));
/// ```
///
/// # 错误
///
/// 未登录返回 401，cargo 不符返回 403 PermissionDenied
pub fn require_cargo(
    cargo: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;
            let admin_user_id = req
                .extensions()
                .get::<AdminUserId>()
                .copied()
                .unwrap_or(AdminUserId(None));

            if !access_allowed(user, Some(cargo), admin_user_id.0) {
                security_log!(
                    "WARN",
                    "cargo_required",
                    user_id = user.id,
                    user_cargo = user.cargo.clone(),
                    required_cargo = cargo
                );
                return Err(AppError::permission_denied(format!(
                    "Cargo required: {}",
                    cargo
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_api_route("/api/auth/login"));
        assert!(is_public_api_route("/api/auth/password-reset/confirm"));
        assert!(is_public_api_route("/api/storefront/orders"));
        assert!(!is_public_api_route("/api/auth/me"));
        assert!(!is_public_api_route("/api/admin/orders"));
        assert!(!is_public_api_route("/api/storefront"));
    }
}
