//! List Repository

use super::{
    BaseRepository, LIST_TABLE, RepoError, RepoResult, make_thing, now_millis,
};
use crate::db::models::{List, ListCreate, ListUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

#[derive(Clone, Debug)]
pub struct ListRepository {
    base: BaseRepository,
}

impl ListRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all lists of a board in creation order
    pub async fn find_by_board(&self, board: &Thing) -> RepoResult<Vec<List>> {
        let lists: Vec<List> = self
            .base
            .db()
            .query("SELECT * FROM list WHERE board = $board ORDER BY createdAt ASC, id ASC")
            .bind(("board", board.clone()))
            .await?
            .take(0)?;
        Ok(lists)
    }

    /// Find list by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<List>> {
        let thing = make_thing(LIST_TABLE, id);
        let list: Option<List> = self
            .base
            .db()
            .select((LIST_TABLE, thing.id.to_string()))
            .await?;
        Ok(list)
    }

    /// Create a new list under a board
    pub async fn create(&self, board: &Thing, data: ListCreate) -> RepoResult<List> {
        let title = data.title.trim().to_string();
        if title.is_empty() {
            return Err(RepoError::Validation("List title must not be empty".into()));
        }

        let list = List {
            id: None,
            title,
            due_date: data.due_date,
            created_at: now_millis(),
            board: board.clone(),
        };

        let created: Option<List> = self.base.db().create(LIST_TABLE).content(list).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create list".to_string()))
    }

    /// Update a list (merge partial fields)
    pub async fn update(&self, id: &str, data: ListUpdate) -> RepoResult<List> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("List {} not found", id)))?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ListUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            due_date: Option<i64>,
        }

        let update_data = ListUpdateDb {
            title: data.title,
            due_date: data.due_date,
        };

        let thing = make_thing(LIST_TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("List {} not found", id)))
    }

    /// Delete a list record (no cascade; idempotent)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = make_thing(LIST_TABLE, id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?
            .check()?;
        Ok(true)
    }
}
