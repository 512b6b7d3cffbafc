use std::sync::Arc;

use dashmap::DashMap;
use shared::message::{SyncMessage, SyncPayload};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::boards::BoardManager;
use crate::core::Config;
use crate::db::{DbService, StoreGateway};
use crate::notepad::NotepadService;
use crate::sync::ChangeHub;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 用于 broadcast_sync 时自动生成递增的版本号，
/// 确保客户端可以通过版本号判断数据新旧。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是看板服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | hub | ChangeHub | 变更/同步广播 |
/// | gateway | Arc<StoreGateway> | 持久化网关 |
/// | boards | Arc<BoardManager> | 看板层级与排序管理 |
/// | notepad | Arc<NotepadService> | 记事本存储 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 变更通知与同步广播
    pub hub: ChangeHub,
    /// 持久化网关 (唯一写入路径)
    pub gateway: Arc<StoreGateway>,
    /// 看板管理器 (排序引擎 + 层级一致性)
    pub boards: Arc<BoardManager>,
    /// 记事本服务
    pub notepad: Arc<NotepadService>,
    /// 资源版本管理器 (用于 broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
    /// 服务实例 epoch - 每次启动生成的唯一 ID
    ///
    /// 客户端据此检测服务重启（版本号已清零），触发全量刷新
    pub epoch: String,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/board.db)
    /// 3. 各服务 (ChangeHub, StoreGateway, BoardManager, NotepadService)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db_dir = config.database_dir();
        let db_path = db_dir.join("board.db");
        let db_service = DbService::new(&db_path)
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        // 2. Initialize services
        let hub = ChangeHub::with_capacity(config.sync_channel_capacity);
        let gateway = Arc::new(StoreGateway::new(db.clone(), hub.clone()));
        let boards = Arc::new(BoardManager::new(gateway.clone()));
        let notepad = Arc::new(
            NotepadService::open(db_dir.join("notepad.redb"))
                .expect("Failed to initialize notepad storage"),
        );
        let resource_versions = Arc::new(ResourceVersions::new());
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "Server state initialized with new epoch");

        Self {
            config: config.clone(),
            db,
            hub,
            gateway,
            boards,
            notepad,
            resource_versions,
            epoch,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 广播同步消息
    ///
    /// 向所有订阅者广播资源变更通知。
    /// 版本号由 ResourceVersions 自动递增管理。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "board", "list", "task", "note")
    /// - `action`: 变更类型 ("created", "updated", "deleted", "reordered", "moved")
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
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
        self.hub.publish_sync(SyncMessage::sync(&payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("task"), 0);
        assert_eq!(versions.increment("task"), 1);
        assert_eq!(versions.increment("task"), 2);
        assert_eq!(versions.increment("board"), 1);
        assert_eq!(versions.get("task"), 2);
    }
}
