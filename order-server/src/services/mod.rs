//! 服务层 - 账号与通知
//!
//! # 服务列表
//!
//! - [`accounts`] - 登录、账号创建、管理员引导、密码重置
//! - [`ResetNotifier`] - 密码重置令牌的投递通道

pub mod accounts;
pub mod notifier;

pub use notifier::{ResetNotifier, TracingResetNotifier};
