//! Label vocabulary endpoint
//!
//! The fixed set the task editor offers. Task writes accept any string, so
//! this stays a read-only vocabulary, not a validation rule.

use axum::{Json, Router, routing::get};
use shared::models::Label;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/labels", get(list))
}

async fn list() -> Json<Vec<Label>> {
    Json(Label::ALL.to_vec())
}
