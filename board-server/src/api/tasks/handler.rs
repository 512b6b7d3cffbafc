//! Task API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Task, TaskCreate, TaskUpdate};
use crate::utils::AppResult;

const RESOURCE: &str = "task";

/// GET /api/lists/:list_id/tasks - 获取列表的所有任务 (按 order 排序)
pub async fn list(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.gateway.fetch_tasks(&list_id).await?;
    Ok(Json(tasks))
}

/// POST /api/lists/:list_id/tasks - 创建任务 (追加到列表末尾)
pub async fn create(
    State(state): State<ServerState>,
    Path(list_id): Path<String>,
    Json(payload): Json<TaskCreate>,
) -> AppResult<Json<Task>> {
    let created = state.boards.create_task(&list_id, payload).await?;

    let id = created.record_id().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&created));

    Ok(Json(created))
}

/// PUT /api/tasks/:id - 更新任务 (标题/标签)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TaskUpdate>,
) -> AppResult<Json<Task>> {
    let updated = state.gateway.update_task(&id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&updated));

    Ok(Json(updated))
}

/// DELETE /api/tasks/:id - 删除任务并重排同列任务的 order
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let deleted = state.boards.delete_task(&id).await?;

    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&()>);

    Ok(Json(deleted))
}
