//! Board Repository

use super::{BOARD_TABLE, BaseRepository, RepoError, RepoResult, make_thing, now_millis};
use crate::db::models::{Board, BoardCreate, BoardUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone, Debug)]
pub struct BoardRepository {
    base: BaseRepository,
}

impl BoardRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all boards in creation order
    pub async fn find_all(&self) -> RepoResult<Vec<Board>> {
        let boards: Vec<Board> = self
            .base
            .db()
            .query("SELECT * FROM board ORDER BY createdAt ASC, id ASC")
            .await?
            .take(0)?;
        Ok(boards)
    }

    /// Find board by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Board>> {
        let thing = make_thing(BOARD_TABLE, id);
        let board: Option<Board> = self
            .base
            .db()
            .select((BOARD_TABLE, thing.id.to_string()))
            .await?;
        Ok(board)
    }

    /// Create a new board
    pub async fn create(&self, data: BoardCreate) -> RepoResult<Board> {
        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(RepoError::Validation("Board name must not be empty".into()));
        }

        let board = Board {
            id: None,
            name,
            created_at: now_millis(),
        };

        let created: Option<Board> = self.base.db().create(BOARD_TABLE).content(board).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create board".to_string()))
    }

    /// Update a board (merge partial fields)
    pub async fn update(&self, id: &str, data: BoardUpdate) -> RepoResult<Board> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Board {} not found", id)))?;

        #[derive(Serialize)]
        struct BoardUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
        }

        let update_data = BoardUpdateDb { name: data.name };

        let thing = make_thing(BOARD_TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Board {} not found", id)))
    }

    /// Delete a board record (no cascade; idempotent)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = make_thing(BOARD_TABLE, id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?
            .check()?;
        Ok(true)
    }
}
