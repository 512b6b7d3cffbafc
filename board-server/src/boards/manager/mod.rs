//! BoardManager - drag execution, cascades and per-list write serialization
//!
//! # Drag Flow
//!
//! ```text
//! apply_drag(board, drag)
//!     ├─ 1. No destination -> NoOp (zero persistence calls)
//!     ├─ 2. Lock source (and destination) list, in sorted key order
//!     ├─ 3. Snapshot tasks (watcher mirror if the board is selected,
//!     │     store fetch otherwise)
//!     ├─ 4. plan_drag -> SameList | CrossList
//!     ├─ 5. Execute the plan as one gateway transaction
//!     └─ 6. Feeds re-deliver the canonical state to subscribers
//! ```
//!
//! Locks make order-mutating operations on one list strictly sequential, so
//! a drag computed from a snapshot can no longer overwrite a concurrent
//! drag's result on the same list.

mod error;
pub use error::*;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use surrealdb::sql::Thing;
use tokio::sync::Mutex;

use super::reorder::{DragPlan, DragResult, plan_drag};
use super::watcher::BoardWatcher;
use crate::db::StoreGateway;
use crate::db::models::{Task, TaskCreate};
use crate::db::repository::{BOARD_TABLE, LIST_TABLE, RepoError, TASK_TABLE, make_thing};

/// Outcome of an applied drag, for the initiating caller
///
/// Subscribers receive the actual new state through their feeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragOutcome {
    NoOp,
    #[serde(rename_all = "camelCase")]
    Reordered {
        list_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Moved {
        task_id: String,
        from_list: String,
        to_list: String,
    },
}

/// How many records a fully-successful cascade removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeStats {
    pub lists: usize,
    pub tasks: usize,
}

/// Board hierarchy manager
pub struct BoardManager {
    gateway: Arc<StoreGateway>,
    /// Selected boards, keyed by "board:x"
    watchers: DashMap<String, Arc<BoardWatcher>>,
    /// Per-list write serialization, keyed by "list:x"
    list_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl std::fmt::Debug for BoardManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardManager")
            .field("watchers", &self.watchers.len())
            .field("list_locks", &self.list_locks.len())
            .finish()
    }
}

impl BoardManager {
    pub fn new(gateway: Arc<StoreGateway>) -> Self {
        Self {
            gateway,
            watchers: DashMap::new(),
            list_locks: DashMap::new(),
        }
    }

    pub fn gateway(&self) -> &Arc<StoreGateway> {
        &self.gateway
    }

    // ========== Board selection ==========

    /// Select a board: start (or reuse) the subscription fan-out for its
    /// hierarchy
    pub fn select_board(&self, board_id: &str) -> Arc<BoardWatcher> {
        let key = make_thing(BOARD_TABLE, board_id).to_string();
        self.watchers
            .entry(key)
            .or_insert_with(|| Arc::new(BoardWatcher::attach(&self.gateway, board_id)))
            .clone()
    }

    /// Deselect a board, detaching every feed of its watcher
    pub fn deselect_board(&self, board_id: &str) {
        let key = make_thing(BOARD_TABLE, board_id).to_string();
        if let Some((_, watcher)) = self.watchers.remove(&key) {
            watcher.detach();
        }
    }

    // ========== Drag protocol ==========

    /// Apply a drag result against the current state
    pub async fn apply_drag(&self, board_id: &str, drag: &DragResult) -> ManagerResult<DragOutcome> {
        let Some(destination) = &drag.destination else {
            return Ok(DragOutcome::NoOp);
        };

        // Canonicalize list ids up front so planning and locking agree.
        let src_key = make_thing(LIST_TABLE, &drag.source.list_id).to_string();
        let dst_key = make_thing(LIST_TABLE, &destination.list_id).to_string();

        let mut normalized = drag.clone();
        normalized.source.list_id = src_key.clone();
        if let Some(dest) = &mut normalized.destination {
            dest.list_id = dst_key.clone();
        }

        // Lock both ends in sorted key order so two concurrent cross-list
        // drags cannot deadlock.
        let mut keys = vec![src_key.clone()];
        if dst_key != src_key {
            keys.push(dst_key.clone());
        }
        keys.sort();
        let locks: Vec<Arc<Mutex<()>>> = keys.iter().map(|k| self.lock_for(k)).collect();
        let mut guards = Vec::with_capacity(locks.len());
        for lock in &locks {
            guards.push(lock.lock().await);
        }

        let source_tasks = self.tasks_snapshot(board_id, &src_key).await?;
        let plan = if src_key == dst_key {
            plan_drag(&source_tasks, &source_tasks, &normalized)?
        } else {
            let dest_tasks = self.tasks_snapshot(board_id, &dst_key).await?;
            plan_drag(&source_tasks, &dest_tasks, &normalized)?
        };

        match plan {
            DragPlan::NoOp => Ok(DragOutcome::NoOp),
            DragPlan::SameList { list, ordered } => {
                self.gateway.batch_update_order(&list, &ordered).await?;
                Ok(DragOutcome::Reordered {
                    list_id: list.to_string(),
                })
            }
            DragPlan::CrossList {
                task,
                source_list,
                dest_list,
                new_order,
                source_remaining,
            } => {
                self.gateway
                    .move_task(&task, &source_list, &dest_list, new_order, &source_remaining)
                    .await?;
                Ok(DragOutcome::Moved {
                    task_id: task.to_string(),
                    from_list: source_list.to_string(),
                    to_list: dest_list.to_string(),
                })
            }
        }
    }

    // ========== Task operations ==========

    /// Create a task appended at the end of its list
    pub async fn create_task(&self, list_id: &str, data: TaskCreate) -> ManagerResult<Task> {
        let key = make_thing(LIST_TABLE, list_id).to_string();
        let _guard = self.lock_for(&key).lock().await;
        Ok(self.gateway.create_task(&key, data).await?)
    }

    /// Delete a task and re-pack its list's ranks in one transaction
    pub async fn delete_task(&self, task_id: &str) -> ManagerResult<Task> {
        let task_key = make_thing(TASK_TABLE, task_id).to_string();
        let task = self
            .gateway
            .get_task(&task_key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", task_id)))?;

        let list = task.list.clone();
        let list_key = list.to_string();
        let _guard = self.lock_for(&list_key).lock().await;

        // Re-fetch under the lock; the snapshot that located the task may
        // predate a concurrent reorder.
        let tasks = self.gateway.fetch_tasks(&list_key).await?;
        let remaining: Vec<Thing> = tasks
            .iter()
            .filter(|t| t.record_id().as_deref() != Some(task_key.as_str()))
            .filter_map(|t| t.id.clone())
            .collect();

        let target = make_thing(TASK_TABLE, &task_key);
        self.gateway
            .delete_task_reindexed(&target, &list, &remaining)
            .await?;
        Ok(task)
    }

    // ========== Cascades ==========

    /// Delete a list and all its tasks (tasks first, then the list)
    ///
    /// Best effort: a failure partway leaves the records deleted so far
    /// deleted and reports the progress.
    pub async fn delete_list_cascade(&self, list_id: &str) -> ManagerResult<CascadeStats> {
        let list_key = make_thing(LIST_TABLE, list_id).to_string();
        let mut stats = CascadeStats::default();

        let tasks = self.gateway.fetch_tasks(&list_key).await?;
        for task in &tasks {
            let Some(task_key) = task.record_id() else {
                continue;
            };
            if let Err(source) = self.gateway.delete_task(&task_key).await {
                return Err(self.partial(&list_key, stats, source));
            }
            stats.tasks += 1;
        }

        if let Err(source) = self.gateway.delete_list(&list_key).await {
            return Err(self.partial(&list_key, stats, source));
        }
        stats.lists += 1;
        Ok(stats)
    }

    /// Delete a board and its whole hierarchy
    ///
    /// Per list: delete the tasks, then the list; finally the board itself.
    /// Best effort, like the list cascade.
    pub async fn delete_board_cascade(&self, board_id: &str) -> ManagerResult<CascadeStats> {
        let board_key = make_thing(BOARD_TABLE, board_id).to_string();
        let mut stats = CascadeStats::default();

        let lists = self.gateway.fetch_lists(&board_key).await?;
        for list in &lists {
            let Some(list_key) = list.record_id() else {
                continue;
            };
            let tasks = match self.gateway.fetch_tasks(&list_key).await {
                Ok(tasks) => tasks,
                Err(source) => return Err(self.partial(&board_key, stats, source)),
            };
            for task in &tasks {
                let Some(task_key) = task.record_id() else {
                    continue;
                };
                if let Err(source) = self.gateway.delete_task(&task_key).await {
                    return Err(self.partial(&board_key, stats, source));
                }
                stats.tasks += 1;
            }
            if let Err(source) = self.gateway.delete_list(&list_key).await {
                return Err(self.partial(&board_key, stats, source));
            }
            stats.lists += 1;
        }

        if let Err(source) = self.gateway.delete_board(&board_key).await {
            return Err(self.partial(&board_key, stats, source));
        }

        // The watcher of a deleted board has nothing left to watch.
        if let Some((_, watcher)) = self.watchers.remove(&board_key) {
            watcher.detach();
        }
        Ok(stats)
    }

    // ========== Internals ==========

    fn lock_for(&self, list_key: &str) -> Arc<Mutex<()>> {
        self.list_locks
            .entry(list_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Mirror snapshot when the board is selected, store fetch otherwise
    async fn tasks_snapshot(&self, board_id: &str, list_key: &str) -> ManagerResult<Vec<Task>> {
        let board_key = make_thing(BOARD_TABLE, board_id).to_string();
        if let Some(watcher) = self.watchers.get(&board_key)
            && let Some(tasks) = watcher.tasks_snapshot(list_key)
        {
            return Ok(tasks);
        }
        Ok(self.gateway.fetch_tasks(list_key).await?)
    }

    fn partial(&self, entity: &str, stats: CascadeStats, source: RepoError) -> ManagerError {
        ManagerError::PartialCascade {
            entity: entity.to_string(),
            deleted_tasks: stats.tasks,
            deleted_lists: stats.lists,
            source,
        }
    }
}
