//! List Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

/// List entity, a column of a board; owns zero or more tasks
///
/// Sibling display order is `createdAt` ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    pub title: String,
    /// Nullable due date, epoch milliseconds
    pub due_date: Option<i64>,
    pub created_at: i64,
    /// Owning board
    #[serde(with = "serde_thing")]
    pub board: Thing,
}

impl List {
    /// Full "list:id" record id string, if persisted
    pub fn record_id(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.to_string())
    }
}

/// Create list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCreate {
    pub title: String,
    pub due_date: Option<i64>,
}

/// Update list payload
///
/// An absent `dueDate` keeps the stored value; there is no way to clear a
/// due date once set, matching the edit form's behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUpdate {
    pub title: Option<String>,
    pub due_date: Option<i64>,
}
