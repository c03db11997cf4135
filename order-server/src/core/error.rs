use thiserror::Error;

use crate::utils::{AppError, ErrorCategory, ErrorCode};

/// 启动阶段错误 (配置、数据库、监听)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        // 启动期的校验与认证错误来自配置 (如管理员引导账号)
        match (err.code, err.code.category()) {
            (ErrorCode::DatabaseError, _) => ServerError::Database(err.message),
            (_, ErrorCategory::General | ErrorCategory::Auth) => ServerError::Config(err.message),
            _ => ServerError::Internal(anyhow::Error::new(err)),
        }
    }
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
