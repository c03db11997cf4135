//! Gas Order Server - 瓦斯配送订单服务
//!
//! # 架构概述
//!
//! - **顾客下单** (`api::storefront`): 公开的商品目录与结账，返回 WhatsApp 链接
//! - **员工后台** (`api::orders`, `api::products`, `api::dashboard`)
//! - **认证** (`auth`): JWT + Argon2，按 cargo 控制访问
//! - **实时推送** (`message`): broadcast 总线 + SSE
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx)
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、cargo 守卫
//! ├── services/      # 账号流程、重置通知
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 结账、编号、金额、状态、统计
//! ├── messaging/     # WhatsApp 消息
//! ├── message/       # 消息总线
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod message;
pub mod messaging;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState};
pub use message::MessageBus;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 确保工作目录存在
/// 3. 初始化日志 (`LOG_LEVEL`, `LOG_DIR`; 生产环境输出 JSON)
pub fn setup_environment() -> Result<(), ServerError> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty());
    let json = std::env::var("ENVIRONMENT").is_ok_and(|env| env == "production");
    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____             ___          _
  / ___| __ _ ___  / _ \ _ __ __| | ___ _ __ ___
 | |  _ / _` / __|| | | | '__/ _` |/ _ \ '__/ __|
 | |_| | (_| \__ \| |_| | | | (_| |  __/ |  \__ \
  \____|\__,_|___/ \___/|_|  \__,_|\___|_|  |___/
    "#
    );
}
