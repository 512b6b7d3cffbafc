//! Task Repository
//!
//! Besides plain CRUD, this repository carries the three order-mutating
//! operations of the reordering protocol. Each runs as one SurrealQL
//! transaction so sibling ranks can never be observed half-written:
//!
//! | Operation | Statements |
//! |-----------|------------|
//! | `batch_update_order` | `UPDATE t SET order = i` per task |
//! | `move_to_list` | re-target `list` + rank, then re-pack the source |
//! | `delete_reindexed` | delete one task, then re-pack the survivors |

use super::{
    BaseRepository, RepoError, RepoResult, TASK_TABLE, make_thing, now_millis,
};
use crate::db::models::{Task, TaskCreate, TaskUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

#[derive(Clone, Debug)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tasks of a list sorted by rank
    pub async fn find_by_list(&self, list: &Thing) -> RepoResult<Vec<Task>> {
        let tasks: Vec<Task> = self
            .base
            .db()
            .query("SELECT * FROM task WHERE list = $list ORDER BY `order` ASC")
            .bind(("list", list.clone()))
            .await?
            .take(0)?;
        Ok(tasks)
    }

    /// Count tasks in a list
    pub async fn count_by_list(&self, list: &Thing) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM task WHERE list = $list GROUP ALL")
            .bind(("list", list.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Find task by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Task>> {
        let thing = make_thing(TASK_TABLE, id);
        let task: Option<Task> = self
            .base
            .db()
            .select((TASK_TABLE, thing.id.to_string()))
            .await?;
        Ok(task)
    }

    /// Create a new task in a list at the given rank
    pub async fn create(&self, list: &Thing, data: TaskCreate, order: i64) -> RepoResult<Task> {
        let title = data.title.trim().to_string();
        if title.is_empty() {
            return Err(RepoError::Validation("Task title must not be empty".into()));
        }

        let task = Task {
            id: None,
            title,
            labels: data.labels,
            order,
            created_at: now_millis(),
            list: list.clone(),
        };

        let created: Option<Task> = self.base.db().create(TASK_TABLE).content(task).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    /// Update a task (merge partial fields; rank is not updatable here)
    pub async fn update(&self, id: &str, data: TaskUpdate) -> RepoResult<Task> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))?;

        #[derive(Serialize)]
        struct TaskUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            labels: Option<Vec<String>>,
        }

        let update_data = TaskUpdateDb {
            title: data.title,
            labels: data.labels,
        };

        let thing = make_thing(TASK_TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    /// Delete a task record (no reindex; idempotent)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = make_thing(TASK_TABLE, id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?
            .check()?;
        Ok(true)
    }

    /// Atomically set `order = index` for every task id at its position
    ///
    /// Either all updates land or none do.
    pub async fn batch_update_order(&self, ordered: &[Thing]) -> RepoResult<()> {
        if ordered.is_empty() {
            return Ok(());
        }

        let mut sql = String::from("BEGIN TRANSACTION;");
        for i in 0..ordered.len() {
            sql.push_str(&format!(" UPDATE $t{i} SET `order` = $o{i};"));
        }
        sql.push_str(" COMMIT TRANSACTION;");

        let mut query = self.base.db().query(sql);
        for (i, thing) in ordered.iter().enumerate() {
            query = query
                .bind((format!("t{i}"), thing.clone()))
                .bind((format!("o{i}"), i as i64));
        }
        query.await?.check()?;
        Ok(())
    }

    /// Atomically move a task to another list and re-pack its source list
    ///
    /// The moved task keeps its identity: only the `list` link and the rank
    /// change. `source_remaining` is the source list's surviving task ids in
    /// their final order.
    pub async fn move_to_list(
        &self,
        task: &Thing,
        dest_list: &Thing,
        new_order: i64,
        source_remaining: &[Thing],
    ) -> RepoResult<()> {
        let mut sql =
            String::from("BEGIN TRANSACTION; UPDATE $task SET list = $dest, `order` = $new_order;");
        for i in 0..source_remaining.len() {
            sql.push_str(&format!(" UPDATE $s{i} SET `order` = $r{i};"));
        }
        sql.push_str(" COMMIT TRANSACTION;");

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("task", task.clone()))
            .bind(("dest", dest_list.clone()))
            .bind(("new_order", new_order));
        for (i, thing) in source_remaining.iter().enumerate() {
            query = query
                .bind((format!("s{i}"), thing.clone()))
                .bind((format!("r{i}"), i as i64));
        }
        query.await?.check()?;
        Ok(())
    }

    /// Atomically delete a task and re-pack the survivors of its list
    pub async fn delete_reindexed(&self, task: &Thing, remaining: &[Thing]) -> RepoResult<()> {
        let mut sql = String::from("BEGIN TRANSACTION; DELETE $task;");
        for i in 0..remaining.len() {
            sql.push_str(&format!(" UPDATE $s{i} SET `order` = $r{i};"));
        }
        sql.push_str(" COMMIT TRANSACTION;");

        let mut query = self.base.db().query(sql).bind(("task", task.clone()));
        for (i, thing) in remaining.iter().enumerate() {
            query = query
                .bind((format!("s{i}"), thing.clone()))
                .bind((format!("r{i}"), i as i64));
        }
        query.await?.check()?;
        Ok(())
    }
}
