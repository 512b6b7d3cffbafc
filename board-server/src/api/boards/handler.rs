//! Board API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::boards::manager::{CascadeStats, DragOutcome};
use crate::boards::reorder::DragResult;
use crate::core::ServerState;
use crate::db::models::{Board, BoardCreate, BoardUpdate};
use crate::utils::AppResult;

const RESOURCE: &str = "board";

/// GET /api/boards - 获取所有看板 (按创建时间排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Board>>> {
    let boards = state.gateway.fetch_boards().await?;
    Ok(Json(boards))
}

/// POST /api/boards - 创建看板
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BoardCreate>,
) -> AppResult<Json<Board>> {
    let board = state.gateway.create_board(payload).await?;

    let id = board.record_id().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&board));

    Ok(Json(board))
}

/// PUT /api/boards/:id - 更新看板
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BoardUpdate>,
) -> AppResult<Json<Board>> {
    let board = state.gateway.update_board(&id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&board));

    Ok(Json(board))
}

/// DELETE /api/boards/:id - 级联删除看板及其所有列表和任务
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CascadeStats>> {
    let stats = state.boards.delete_board_cascade(&id).await?;

    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&()>);

    Ok(Json(stats))
}

/// POST /api/boards/:id/drag - 应用拖拽结果
pub async fn drag(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DragResult>,
) -> AppResult<Json<DragOutcome>> {
    let outcome = state.boards.apply_drag(&id, &payload).await?;

    match &outcome {
        DragOutcome::NoOp => {}
        DragOutcome::Reordered { list_id } => {
            state.broadcast_sync("task", "reordered", list_id, None::<&()>);
        }
        DragOutcome::Moved { task_id, .. } => {
            state.broadcast_sync("task", "moved", task_id, None::<&()>);
        }
    }

    Ok(Json(outcome))
}
