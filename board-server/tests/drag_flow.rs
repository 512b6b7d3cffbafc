//! End-to-end drag protocol flow over a real embedded database
//! Run: cargo test -p board-server --test drag_flow

use std::sync::Arc;
use std::time::Duration;

use board_server::db::models::{BoardCreate, ListCreate, TaskCreate};
use board_server::{BoardManager, ChangeHub, DbService, StoreGateway};
use board_server::boards::reorder::{DragLocation, DragResult};

async fn setup() -> (Arc<BoardManager>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("board.db"))
        .await
        .unwrap()
        .db;
    let gateway = Arc::new(StoreGateway::new(db, ChangeHub::new()));
    (Arc::new(BoardManager::new(gateway)), tmp)
}

fn drag(src: (&str, usize), dest: Option<(&str, usize)>) -> DragResult {
    DragResult {
        source: DragLocation {
            list_id: src.0.to_string(),
            index: src.1,
        },
        destination: dest.map(|(list_id, index)| DragLocation {
            list_id: list_id.to_string(),
            index,
        }),
    }
}

/// Exercise the full lifecycle the UI drives: build a board, drag within and
/// across lists while a subscriber watches, then tear everything down.
#[tokio::test]
async fn board_lifecycle_with_live_subscriber() {
    let (manager, _tmp) = setup().await;
    let gateway = manager.gateway().clone();

    let board = gateway
        .create_board(BoardCreate {
            name: "Project".into(),
        })
        .await
        .unwrap()
        .record_id()
        .unwrap();

    let todo = gateway
        .create_list(
            &board,
            ListCreate {
                title: "Todo".into(),
                due_date: Some(1_754_000_000_000),
            },
        )
        .await
        .unwrap()
        .record_id()
        .unwrap();
    let done = gateway
        .create_list(
            &board,
            ListCreate {
                title: "Done".into(),
                due_date: None,
            },
        )
        .await
        .unwrap()
        .record_id()
        .unwrap();

    for title in ["Design", "Build", "Ship"] {
        manager
            .create_task(
                &todo,
                TaskCreate {
                    title: title.into(),
                    labels: vec!["Feature".into()],
                },
            )
            .await
            .unwrap();
    }

    // A live subscriber mirrors the todo list
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let guard = gateway.subscribe_tasks(&todo, move |tasks| {
        let _ = tx.send(tasks);
    });
    let snapshot = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.len(), 3);

    // Same-list drag: Ship to the front
    manager
        .apply_drag(&board, &drag((&todo, 2), Some((&todo, 0))))
        .await
        .unwrap();
    let after_reorder = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    let titles: Vec<&str> = after_reorder.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Ship", "Design", "Build"]);
    let orders: Vec<i64> = after_reorder.iter().map(|t| t.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    // Cross-list drag: Ship moves to Done, landing at its end
    manager
        .apply_drag(&board, &drag((&todo, 0), Some((&done, 0))))
        .await
        .unwrap();
    let after_move = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    let titles: Vec<&str> = after_move.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Design", "Build"]);

    let done_tasks = gateway.fetch_tasks(&done).await.unwrap();
    assert_eq!(done_tasks.len(), 1);
    assert_eq!(done_tasks[0].title, "Ship");
    assert_eq!(done_tasks[0].order, 0);
    assert_eq!(done_tasks[0].labels, vec!["Feature"]);

    guard.unsubscribe();

    // Cascade: the whole hierarchy disappears
    let stats = manager.delete_board_cascade(&board).await.unwrap();
    assert_eq!(stats.lists, 2);
    assert_eq!(stats.tasks, 3);
    assert!(gateway.fetch_boards().await.unwrap().is_empty());
    assert!(gateway.fetch_tasks(&todo).await.unwrap().is_empty());
    assert!(gateway.fetch_tasks(&done).await.unwrap().is_empty());
}
