//! Repository Module
//!
//! CRUD operations over the SurrealDB tables. One repository per entity;
//! order-mutating operations run as multi-statement transactions.

pub mod board;
pub mod list;
pub mod task;

pub use board::BoardRepository;
pub use list::ListRepository;
pub use task::TaskRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

pub const BOARD_TABLE: &str = "board";
pub const LIST_TABLE: &str = "list";
pub const TASK_TABLE: &str = "task";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone, Debug)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Extract the pure id when the string carries the table prefix
/// (e.g. "board:xxx" -> "xxx")
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Build a record id from a table name and a pure or prefixed id
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Current time as epoch milliseconds (the stored timestamp format)
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_matching_prefix() {
        assert_eq!(strip_table_prefix("board", "board:abc"), "abc");
        assert_eq!(strip_table_prefix("board", "abc"), "abc");
        assert_eq!(strip_table_prefix("board", "list:abc"), "list:abc");
    }

    #[test]
    fn make_thing_accepts_both_forms() {
        assert_eq!(make_thing("task", "task:x1").to_string(), "task:x1");
        assert_eq!(make_thing("task", "x1").to_string(), "task:x1");
    }
}
