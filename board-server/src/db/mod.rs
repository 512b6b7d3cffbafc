//! Database Module
//!
//! Owns the embedded SurrealDB instance and the schema definitions for the
//! board hierarchy tables.

pub mod gateway;
pub mod models;
pub mod repository;

pub use gateway::StoreGateway;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use repository::{RepoError, RepoResult};

/// Table and index definitions
///
/// SCHEMAFULL tables with typed `record` fields, so that string-encoded
/// record ids coerce into real links on write. `order` is a SurrealQL
/// keyword and stays backtick-escaped everywhere it appears in a query.
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS board SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS name ON board TYPE string;
    DEFINE FIELD IF NOT EXISTS createdAt ON board TYPE int;

    DEFINE TABLE IF NOT EXISTS list SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS title ON list TYPE string;
    DEFINE FIELD IF NOT EXISTS dueDate ON list TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS createdAt ON list TYPE int;
    DEFINE FIELD IF NOT EXISTS board ON list TYPE record<board>;
    DEFINE INDEX IF NOT EXISTS list_board ON list FIELDS board;

    DEFINE TABLE IF NOT EXISTS task SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS title ON task TYPE string;
    DEFINE FIELD IF NOT EXISTS labels ON task TYPE array<string>;
    DEFINE FIELD IF NOT EXISTS `order` ON task TYPE int;
    DEFINE FIELD IF NOT EXISTS createdAt ON task TYPE int;
    DEFINE FIELD IF NOT EXISTS list ON task TYPE record<list>;
    DEFINE INDEX IF NOT EXISTS task_list ON task FIELDS list;
";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at the given path and apply the schema
    pub async fn new(db_path: &Path) -> RepoResult<Self> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;
        db.use_ns("board").use_db("board").await?;

        db.query(SCHEMA).await?.check()?;

        tracing::info!(path = %db_path.display(), "Database ready");
        Ok(Self { db })
    }
}
