use super::*;

#[tokio::test]
async fn board_cascade_removes_every_descendant() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Release").await;
    let list_a = seed_list(&manager, &board, "Todo").await;
    let list_b = seed_list(&manager, &board, "Doing").await;
    seed_tasks(&manager, &list_a, &["A1", "A2", "A3"]).await;
    seed_tasks(&manager, &list_b, &["B1", "B2", "B3"]).await;

    let stats = manager.delete_board_cascade(&board).await.unwrap();
    assert_eq!(stats, CascadeStats { lists: 2, tasks: 6 });

    assert!(manager.gateway().get_board(&board).await.unwrap().is_none());
    assert!(manager.gateway().fetch_lists(&board).await.unwrap().is_empty());
    assert!(manager.gateway().fetch_tasks(&list_a).await.unwrap().is_empty());
    assert!(manager.gateway().fetch_tasks(&list_b).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_cascade_removes_tasks_then_list() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Release").await;
    let list = seed_list(&manager, &board, "Todo").await;
    seed_tasks(&manager, &list, &["A", "B"]).await;

    let stats = manager.delete_list_cascade(&list).await.unwrap();
    assert_eq!(stats, CascadeStats { lists: 1, tasks: 2 });

    assert!(manager.gateway().get_list(&list).await.unwrap().is_none());
    assert!(manager.gateway().fetch_tasks(&list).await.unwrap().is_empty());
    // The board itself is untouched
    assert!(manager.gateway().get_board(&board).await.unwrap().is_some());
}

#[tokio::test]
async fn cascade_of_empty_board_reports_zero() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Empty").await;

    let stats = manager.delete_board_cascade(&board).await.unwrap();
    assert_eq!(stats, CascadeStats::default());
    assert!(manager.gateway().get_board(&board).await.unwrap().is_none());
}

#[tokio::test]
async fn other_boards_survive_a_cascade() {
    let (manager, _tmp) = create_test_manager().await;
    let doomed = seed_board(&manager, "Doomed").await;
    let kept = seed_board(&manager, "Kept").await;
    let doomed_list = seed_list(&manager, &doomed, "Todo").await;
    let kept_list = seed_list(&manager, &kept, "Todo").await;
    seed_tasks(&manager, &doomed_list, &["X"]).await;
    seed_tasks(&manager, &kept_list, &["K"]).await;

    manager.delete_board_cascade(&doomed).await.unwrap();

    let kept_tasks = manager.gateway().fetch_tasks(&kept_list).await.unwrap();
    assert_eq!(titles_of(&kept_tasks), vec!["K"]);
    assert_eq!(manager.gateway().fetch_lists(&kept).await.unwrap().len(), 1);
}
