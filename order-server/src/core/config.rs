use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (支持 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 滚动日志目录 (不设置则只输出到终端) |
/// | TLS_CERT_PATH / TLS_KEY_PATH | - | 同时设置时启用 HTTPS |
/// | ADMIN_USER_ID | - | 始终放行的管理员用户 ID |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | - | 启动时创建的管理员账号 |
/// | STORE_NAME | Norte Gás | 店铺名称 (WhatsApp 消息抬头) |
/// | WHATSAPP_NUMBER | 5532991440248 | 接单 WhatsApp 号码 |
/// | PIX_KEY | - | 店铺 PIX 收款码 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/gas HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,

    /// User id that passes every cargo check
    pub admin_user_id: Option<i64>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    pub store_name: String,
    /// Digits of the number that receives storefront orders
    pub whatsapp_number: String,
    pub pix_key: Option<String>,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值；JWT 密钥无效时返回错误
    pub fn from_env() -> Result<Self> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(Self {
            work_dir: env_opt("WORK_DIR").unwrap_or_else(|| "./data".into()),
            http_port: env_opt("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            tls_cert_path: env_opt("TLS_CERT_PATH"),
            tls_key_path: env_opt("TLS_KEY_PATH"),
            jwt,
            admin_user_id: env_opt("ADMIN_USER_ID").and_then(|v| v.parse().ok()),
            admin_email: env_opt("ADMIN_EMAIL"),
            admin_password: env_opt("ADMIN_PASSWORD"),
            store_name: env_opt("STORE_NAME").unwrap_or_else(|| "Norte Gás".into()),
            whatsapp_number: env_opt("WHATSAPP_NUMBER").unwrap_or_else(|| "5532991440248".into()),
            pix_key: env_opt("PIX_KEY"),
        })
    }

    /// 使用自定义值构造配置，不读取环境变量
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16, jwt: JwtConfig) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            tls_cert_path: None,
            tls_key_path: None,
            jwt,
            admin_user_id: None,
            admin_email: None,
            admin_password: None,
            store_name: "Norte Gás".into(),
            whatsapp_number: "5532991440248".into(),
            pix_key: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Both TLS files, when HTTPS is configured
    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some((cert, key)),
            _ => None,
        }
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("orders.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_and_paths() {
        let config = Config::with_overrides(
            "/tmp/gas",
            4000,
            JwtConfig::with_secret("a-test-secret-with-enough-length-000"),
        );
        assert_eq!(config.http_port, 4000);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/gas/database/orders.db")
        );
    }

    #[test]
    fn test_tls_requires_both_files() {
        let mut config = Config::with_overrides(
            "/tmp/gas",
            4000,
            JwtConfig::with_secret("a-test-secret-with-enough-length-000"),
        );
        config.tls_cert_path = Some("cert.pem".into());
        config.tls_key_path = None;
        assert!(config.tls_paths().is_none());
        config.tls_key_path = Some("key.pem".into());
        assert_eq!(config.tls_paths(), Some(("cert.pem", "key.pem")));
    }
}
