//! List API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::boards::manager::CascadeStats;
use crate::core::ServerState;
use crate::db::models::{List, ListCreate, ListUpdate};
use crate::utils::AppResult;

const RESOURCE: &str = "list";

/// GET /api/boards/:board_id/lists - 获取看板的所有列表 (按创建时间排序)
pub async fn list(
    State(state): State<ServerState>,
    Path(board_id): Path<String>,
) -> AppResult<Json<Vec<List>>> {
    let lists = state.gateway.fetch_lists(&board_id).await?;
    Ok(Json(lists))
}

/// POST /api/boards/:board_id/lists - 创建列表
pub async fn create(
    State(state): State<ServerState>,
    Path(board_id): Path<String>,
    Json(payload): Json<ListCreate>,
) -> AppResult<Json<List>> {
    let created = state.gateway.create_list(&board_id, payload).await?;

    let id = created.record_id().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&created));

    Ok(Json(created))
}

/// PUT /api/lists/:id - 更新列表
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ListUpdate>,
) -> AppResult<Json<List>> {
    let updated = state.gateway.update_list(&id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&updated));

    Ok(Json(updated))
}

/// DELETE /api/lists/:id - 级联删除列表及其所有任务
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CascadeStats>> {
    let stats = state.boards.delete_list_cascade(&id).await?;

    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&()>);

    Ok(Json(stats))
}
