//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`boards`] - 看板管理与拖拽接口
//! - [`lists`] - 列表管理接口
//! - [`tasks`] - 任务管理接口
//! - [`labels`] - 标签词汇表
//! - [`notes`] - 记事本接口

pub mod boards;
pub mod health;
pub mod labels;
pub mod lists;
pub mod notes;
pub mod tasks;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(boards::router())
        .merge(lists::router())
        .merge(tasks::router())
        .merge(labels::router())
        .merge(notes::router())
}
