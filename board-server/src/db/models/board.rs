//! Board Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

/// Board entity, the root of the hierarchy; owns zero or more lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    pub name: String,
    /// Epoch milliseconds, assigned by the gateway at create time
    pub created_at: i64,
}

impl Board {
    /// Full "board:id" record id string, if persisted
    pub fn record_id(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.to_string())
    }
}

/// Create board payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCreate {
    pub name: String,
}

/// Update board payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardUpdate {
    pub name: Option<String>,
}
