//! Task Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

/// Task entity, a card within a list
///
/// `order` is the zero-based dense rank within the owning list; the
/// reordering protocol keeps the set of ranks equal to `{0..n-1}` after
/// every mutation. Labels are free strings (the UI offers the fixed
/// vocabulary from `shared::models::Label` but out-of-vocabulary values are
/// stored as-is).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    pub title: String,
    pub labels: Vec<String>,
    pub order: i64,
    pub created_at: i64,
    /// Owning list
    #[serde(with = "serde_thing")]
    pub list: Thing,
}

impl Task {
    /// Full "task:id" record id string, if persisted
    pub fn record_id(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.to_string())
    }
}

/// Create task payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Update task payload
///
/// `order` is deliberately absent: rank changes only go through the
/// reordering protocol, never through a field update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub labels: Option<Vec<String>>,
}
