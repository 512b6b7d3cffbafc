//! Sync payload types

use serde::{Deserialize, Serialize};

/// Resource change notification (server -> clients)
///
/// # Example
/// - `resource`: "task"
/// - `version`: 42
/// - `action`: "updated"
/// - `id`: "task:o5kq30s2zkxq1cb5y1ga"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type ("board", "list", "task", "note")
    pub resource: String,
    /// Monotonic per-resource version, used by clients to detect missed updates
    pub version: u64,
    /// Change kind ("created", "updated", "deleted", "reordered", "moved")
    pub action: String,
    /// Id of the affected entity
    pub id: String,
    /// Entity data (None for deletions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
