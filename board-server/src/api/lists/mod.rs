//! List API 模块
//!
//! 读取/创建挂在所属看板路径下，更新/删除直接按列表 ID 寻址。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/boards/{board_id}/lists",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/lists/{id}",
            put(handler::update).delete(handler::delete),
        )
}
