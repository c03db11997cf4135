use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use shared::message::SyncPayload;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::message::MessageBus;
use crate::services::{ResetNotifier, TracingResetNotifier};

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// 用于 broadcast_sync 时自动生成递增的版本号，
/// 确保客户端可以通过版本号判断数据新旧。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号，不存在时返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一份。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | jwt_service | JWT 认证服务 |
/// | message_bus | 实时变更广播 |
/// | resource_versions | 资源版本管理 |
/// | reset_notifier | 密码重置令牌投递 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub message_bus: MessageBus,
    pub resource_versions: Arc<ResourceVersions>,
    pub reset_notifier: Arc<dyn ResetNotifier>,
}

impl ServerState {
    /// 用现成的数据库构造状态
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            message_bus: MessageBus::new(),
            resource_versions: Arc::new(ResourceVersions::new()),
            reset_notifier: Arc::new(TracingResetNotifier),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (work_dir/database)
    /// 2. 数据库 (work_dir/database/orders.db，含迁移)
    /// 3. 各服务 (JWT, MessageBus)
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(config.database_dir())?;

        let db_path = config.database_path();
        let db = DbService::open(&db_path.to_string_lossy()).await?;

        Ok(Self::with_db(config.clone(), db))
    }

    /// State over a fresh in-memory database
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::open_in_memory().await?;
        Ok(Self::with_db(config, db))
    }

    #[cfg(test)]
    pub(crate) async fn for_tests() -> Self {
        let config = Config::with_overrides(
            std::env::temp_dir().to_string_lossy(),
            0,
            crate::auth::JwtConfig::with_secret("unit-test-secret-with-at-least-32-chars"),
        );
        Self::in_memory(config).await.unwrap()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 广播同步消息
    ///
    /// 向所有订阅者广播资源变更通知。
    /// 版本号由 ResourceVersions 自动递增管理。
    ///
    /// # 参数
    /// - `resource`: 资源类型 ("order", "product", "profile")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub async fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        let receivers = self.message_bus.publish(payload);
        tracing::debug!(resource, action, id, version, receivers, "Sync broadcast");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("order"), 0);
        assert_eq!(versions.increment("order"), 1);
        assert_eq!(versions.increment("order"), 2);
        assert_eq!(versions.increment("product"), 1);
        assert_eq!(versions.get("order"), 2);
    }

    #[tokio::test]
    async fn test_broadcast_sync_reaches_subscriber() {
        let state = ServerState::for_tests().await;
        let mut rx = state.message_bus.subscribe();

        state
            .broadcast_sync::<()>("product", "deleted", "42", None)
            .await;
        state
            .broadcast_sync("product", "updated", "43", Some(&serde_json::json!({"name": "P13"})))
            .await;

        let first = rx.recv().await.unwrap();
        assert_eq!(first.version, 1);
        assert!(first.is_deletion());
        let second = rx.recv().await.unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.data.unwrap()["name"], "P13");
    }
}
