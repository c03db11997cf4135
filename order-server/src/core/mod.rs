//! 订单服务核心 - 启动配置、共享状态和启动错误
//!
//! - [`Config`] - 环境变量配置 (端口、JWT、TLS、门店与 WhatsApp 信息)
//! - [`ServerState`] - 各请求共享的数据库、JWT、实时消息总线
//! - [`Server`] - 管理员引导与 HTTP/HTTPS 监听
//! - [`ServerError`] - 启动阶段错误

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
