//! Task API 模块
//!
//! 读取/创建挂在所属列表路径下，更新/删除直接按任务 ID 寻址。
//! 任务排序只通过拖拽接口变更 (POST /api/boards/:id/drag)。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/lists/{list_id}/tasks",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/tasks/{id}",
            put(handler::update).delete(handler::delete),
        )
}
