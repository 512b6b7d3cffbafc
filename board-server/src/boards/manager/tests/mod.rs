use std::sync::Arc;

use tempfile::TempDir;

use super::*;
use crate::boards::reorder::{DragLocation, DragResult};
use crate::db::models::{BoardCreate, ListCreate, TaskCreate};
use crate::db::{DbService, StoreGateway};
use crate::sync::ChangeHub;

mod test_cascade;
mod test_reorder;

/// Fresh manager over a throwaway database. Keep the TempDir alive for the
/// duration of the test.
async fn create_test_manager() -> (BoardManager, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("board.db"))
        .await
        .unwrap()
        .db;
    let gateway = Arc::new(StoreGateway::new(db, ChangeHub::new()));
    (BoardManager::new(gateway), tmp)
}

async fn seed_board(manager: &BoardManager, name: &str) -> String {
    manager
        .gateway()
        .create_board(BoardCreate {
            name: name.to_string(),
        })
        .await
        .unwrap()
        .record_id()
        .unwrap()
}

async fn seed_list(manager: &BoardManager, board: &str, title: &str) -> String {
    manager
        .gateway()
        .create_list(
            board,
            ListCreate {
                title: title.to_string(),
                due_date: None,
            },
        )
        .await
        .unwrap()
        .record_id()
        .unwrap()
}

/// Create `titles.len()` tasks in order; each appends at the end
async fn seed_tasks(manager: &BoardManager, list: &str, titles: &[&str]) -> Vec<String> {
    let mut ids = Vec::new();
    for title in titles {
        let task = manager
            .create_task(
                list,
                TaskCreate {
                    title: title.to_string(),
                    labels: Vec::new(),
                },
            )
            .await
            .unwrap();
        ids.push(task.record_id().unwrap());
    }
    ids
}

fn drag(src_list: &str, src_index: usize, dest: Option<(&str, usize)>) -> DragResult {
    DragResult {
        source: DragLocation {
            list_id: src_list.to_string(),
            index: src_index,
        },
        destination: dest.map(|(list_id, index)| DragLocation {
            list_id: list_id.to_string(),
            index,
        }),
    }
}

fn titles_of(tasks: &[crate::db::models::Task]) -> Vec<String> {
    tasks.iter().map(|t| t.title.clone()).collect()
}

fn orders_of(tasks: &[crate::db::models::Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.order).collect()
}
