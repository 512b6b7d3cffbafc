//! Persistence Gateway
//!
//! The single write path to the store. Every mutation goes through here so
//! that a change notification is emitted exactly when a write commits; live
//! feeds can therefore never miss an update. Reads are plain pass-throughs
//! to the repositories.
//!
//! Id arguments accept both the pure form ("xyz") and the prefixed form
//! ("board:xyz"); scopes and returned ids are always the prefixed form.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use crate::db::models::{
    Board, BoardCreate, BoardUpdate, List, ListCreate, ListUpdate, Task, TaskCreate, TaskUpdate,
};
use crate::db::repository::{
    BOARD_TABLE, BoardRepository, LIST_TABLE, ListRepository, RepoResult, TaskRepository,
    make_thing,
};
use crate::sync::{ChangeHub, EntityKind, FeedGuard, ROOT_SCOPE, feed};

#[derive(Clone, Debug)]
pub struct StoreGateway {
    boards: BoardRepository,
    lists: ListRepository,
    tasks: TaskRepository,
    hub: ChangeHub,
}

impl StoreGateway {
    pub fn new(db: Surreal<Db>, hub: ChangeHub) -> Self {
        Self {
            boards: BoardRepository::new(db.clone()),
            lists: ListRepository::new(db.clone()),
            tasks: TaskRepository::new(db),
            hub,
        }
    }

    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    // ========== Boards ==========

    pub async fn fetch_boards(&self) -> RepoResult<Vec<Board>> {
        self.boards.find_all().await
    }

    pub async fn get_board(&self, board_id: &str) -> RepoResult<Option<Board>> {
        self.boards.find_by_id(board_id).await
    }

    pub async fn create_board(&self, data: BoardCreate) -> RepoResult<Board> {
        let board = self.boards.create(data).await?;
        self.hub.notify(EntityKind::Board, ROOT_SCOPE);
        Ok(board)
    }

    pub async fn update_board(&self, board_id: &str, data: BoardUpdate) -> RepoResult<Board> {
        let board = self.boards.update(board_id, data).await?;
        self.hub.notify(EntityKind::Board, ROOT_SCOPE);
        Ok(board)
    }

    /// Delete the board record only; descendants are the caller's concern
    pub async fn delete_board(&self, board_id: &str) -> RepoResult<bool> {
        let deleted = self.boards.delete(board_id).await?;
        self.hub.notify(EntityKind::Board, ROOT_SCOPE);
        Ok(deleted)
    }

    // ========== Lists ==========

    pub async fn fetch_lists(&self, board_id: &str) -> RepoResult<Vec<List>> {
        self.lists
            .find_by_board(&make_thing(BOARD_TABLE, board_id))
            .await
    }

    pub async fn get_list(&self, list_id: &str) -> RepoResult<Option<List>> {
        self.lists.find_by_id(list_id).await
    }

    pub async fn create_list(&self, board_id: &str, data: ListCreate) -> RepoResult<List> {
        let board = make_thing(BOARD_TABLE, board_id);
        let list = self.lists.create(&board, data).await?;
        self.hub.notify(EntityKind::List, board.to_string());
        Ok(list)
    }

    pub async fn update_list(&self, list_id: &str, data: ListUpdate) -> RepoResult<List> {
        let list = self.lists.update(list_id, data).await?;
        self.hub.notify(EntityKind::List, list.board.to_string());
        Ok(list)
    }

    /// Delete the list record only; owned tasks are the caller's concern
    pub async fn delete_list(&self, list_id: &str) -> RepoResult<bool> {
        // The owning board is needed for the notification scope, so look the
        // record up first. Deleting an already-gone list stays a no-op.
        let Some(list) = self.lists.find_by_id(list_id).await? else {
            return Ok(true);
        };
        let deleted = self.lists.delete(list_id).await?;
        self.hub.notify(EntityKind::List, list.board.to_string());
        Ok(deleted)
    }

    // ========== Tasks ==========

    pub async fn fetch_tasks(&self, list_id: &str) -> RepoResult<Vec<Task>> {
        self.tasks
            .find_by_list(&make_thing(LIST_TABLE, list_id))
            .await
    }

    pub async fn get_task(&self, task_id: &str) -> RepoResult<Option<Task>> {
        self.tasks.find_by_id(task_id).await
    }

    /// Create a task appended at the end of its list (`order = count`)
    pub async fn create_task(&self, list_id: &str, data: TaskCreate) -> RepoResult<Task> {
        let list = make_thing(LIST_TABLE, list_id);
        let order = self.tasks.count_by_list(&list).await?;
        let task = self.tasks.create(&list, data, order).await?;
        self.hub.notify(EntityKind::Task, list.to_string());
        Ok(task)
    }

    pub async fn update_task(&self, task_id: &str, data: TaskUpdate) -> RepoResult<Task> {
        let task = self.tasks.update(task_id, data).await?;
        self.hub.notify(EntityKind::Task, task.list.to_string());
        Ok(task)
    }

    /// Delete the task record only, leaving sibling ranks untouched
    ///
    /// Used by the cascades, where the whole list disappears anyway.
    pub async fn delete_task(&self, task_id: &str) -> RepoResult<bool> {
        let Some(task) = self.tasks.find_by_id(task_id).await? else {
            return Ok(true);
        };
        let deleted = self.tasks.delete(task_id).await?;
        self.hub.notify(EntityKind::Task, task.list.to_string());
        Ok(deleted)
    }

    /// Atomically assign `order = index` along the given sequence
    pub async fn batch_update_order(&self, list: &Thing, ordered: &[Thing]) -> RepoResult<()> {
        self.tasks.batch_update_order(ordered).await?;
        self.hub.notify(EntityKind::Task, list.to_string());
        Ok(())
    }

    /// Atomically re-parent a task and re-pack its source list
    pub async fn move_task(
        &self,
        task: &Thing,
        source_list: &Thing,
        dest_list: &Thing,
        new_order: i64,
        source_remaining: &[Thing],
    ) -> RepoResult<()> {
        self.tasks
            .move_to_list(task, dest_list, new_order, source_remaining)
            .await?;
        self.hub.notify(EntityKind::Task, source_list.to_string());
        self.hub.notify(EntityKind::Task, dest_list.to_string());
        Ok(())
    }

    /// Atomically delete a task and re-pack the survivors of its list
    pub async fn delete_task_reindexed(
        &self,
        task: &Thing,
        list: &Thing,
        remaining: &[Thing],
    ) -> RepoResult<()> {
        self.tasks.delete_reindexed(task, remaining).await?;
        self.hub.notify(EntityKind::Task, list.to_string());
        Ok(())
    }

    // ========== Live feeds ==========

    /// Watch the boards collection (creation order)
    pub fn subscribe_boards(
        &self,
        callback: impl Fn(Vec<Board>) + Send + Sync + 'static,
    ) -> FeedGuard {
        let repo = self.boards.clone();
        feed::spawn_feed(
            &self.hub,
            EntityKind::Board,
            ROOT_SCOPE.to_string(),
            move || {
                let repo = repo.clone();
                async move { repo.find_all().await }
            },
            Arc::new(callback),
        )
    }

    /// Watch one board's lists (creation order)
    pub fn subscribe_lists(
        &self,
        board_id: &str,
        callback: impl Fn(Vec<List>) + Send + Sync + 'static,
    ) -> FeedGuard {
        let repo = self.lists.clone();
        let board = make_thing(BOARD_TABLE, board_id);
        let scope = board.to_string();
        feed::spawn_feed(
            &self.hub,
            EntityKind::List,
            scope,
            move || {
                let repo = repo.clone();
                let board = board.clone();
                async move { repo.find_by_board(&board).await }
            },
            Arc::new(callback),
        )
    }

    /// Watch one list's tasks (rank order)
    pub fn subscribe_tasks(
        &self,
        list_id: &str,
        callback: impl Fn(Vec<Task>) + Send + Sync + 'static,
    ) -> FeedGuard {
        let repo = self.tasks.clone();
        let list = make_thing(LIST_TABLE, list_id);
        let scope = list.to_string();
        feed::spawn_feed(
            &self.hub,
            EntityKind::Task,
            scope,
            move || {
                let repo = repo.clone();
                let list = list.clone();
                async move { repo.find_by_list(&list).await }
            },
            Arc::new(callback),
        )
    }
}
