//! 认证授权模块
//!
//! 提供 JWT 认证、cargo 守卫和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_cargo`] - cargo 检查中间件
//! - [`access_allowed`] - 路由守卫规则

pub mod extractor;
pub mod guard;
pub mod jwt;
pub mod middleware;

pub use guard::{AdminUserId, access_allowed};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_cargo};
