//! Board Server - 实时看板与记事本服务
//!
//! # 架构概述
//!
//! 本模块是 Board Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与持久化网关
//! - **实时同步** (`sync`): 变更广播与订阅 feed
//! - **看板引擎** (`boards`): 拖拽排序协议、订阅扇出、级联删除
//! - **记事本** (`notepad`): 单键全量重写的笔记存储
//! - **HTTP API** (`api`): RESTful 意图接口
//!
//! # 模块结构
//!
//! ```text
//! board-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库层 (模型、仓储、网关)
//! ├── sync/          # 变更广播与订阅 feed
//! ├── boards/        # 排序引擎与层级一致性
//! ├── notepad/       # 记事本存储
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```
//!
//! # 数据流
//!
//! ```text
//! UI 意图 ──▶ api ──▶ BoardManager / StoreGateway ──▶ SurrealDB
//!                                   │
//!                            ChangeHub 广播
//!                                   ▼
//!                       订阅 feed 重查 ──▶ 回调 (唯一可信状态)
//! ```

pub mod api;
pub mod boards;
pub mod core;
pub mod db;
pub mod notepad;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use boards::{BoardManager, BoardWatcher, DragOutcome, DragResult};
pub use core::{Config, Server, ServerState};
pub use db::{DbService, StoreGateway};
pub use notepad::NotepadService;
pub use sync::{ChangeHub, FeedGuard};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
