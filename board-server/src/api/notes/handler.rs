//! Notepad API Handlers
//!
//! The notepad persists as one collection value: GET returns it whole, PUT
//! replaces it whole.

use axum::{Json, extract::State};
use shared::models::Note;

use crate::core::ServerState;
use crate::utils::AppResult;

const RESOURCE: &str = "note";

/// GET /api/notes - 读取全部笔记
pub async fn load(State(state): State<ServerState>) -> AppResult<Json<Vec<Note>>> {
    let notes = state.notepad.load_notes()?;
    Ok(Json(notes))
}

/// PUT /api/notes - 整体覆盖保存全部笔记
pub async fn save(
    State(state): State<ServerState>,
    Json(notes): Json<Vec<Note>>,
) -> AppResult<Json<Vec<Note>>> {
    state.notepad.save_notes(&notes)?;

    state.broadcast_sync(RESOURCE, "saved", "notepad-notes", Some(&notes));

    Ok(Json(notes))
}
