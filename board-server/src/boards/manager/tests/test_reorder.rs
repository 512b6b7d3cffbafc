use super::*;

#[tokio::test]
async fn create_appends_at_end() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list = seed_list(&manager, &board, "Todo").await;
    seed_tasks(&manager, &list, &["A", "B", "C"]).await;

    let tasks = manager.gateway().fetch_tasks(&list).await.unwrap();
    assert_eq!(titles_of(&tasks), vec!["A", "B", "C"]);
    assert_eq!(orders_of(&tasks), vec![0, 1, 2]);
}

#[tokio::test]
async fn same_list_reorder_preserves_relative_order_and_density() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list = seed_list(&manager, &board, "Todo").await;
    seed_tasks(&manager, &list, &["A", "B", "C", "D"]).await;

    let outcome = manager
        .apply_drag(&board, &drag(&list, 0, Some((&list, 2))))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DragOutcome::Reordered {
            list_id: list.clone()
        }
    );

    let tasks = manager.gateway().fetch_tasks(&list).await.unwrap();
    assert_eq!(titles_of(&tasks), vec!["B", "C", "A", "D"]);
    assert_eq!(orders_of(&tasks), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn cancelled_drag_touches_nothing() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list = seed_list(&manager, &board, "Todo").await;
    seed_tasks(&manager, &list, &["A", "B"]).await;

    let outcome = manager
        .apply_drag(&board, &drag(&list, 0, None))
        .await
        .unwrap();
    assert_eq!(outcome, DragOutcome::NoOp);

    let tasks = manager.gateway().fetch_tasks(&list).await.unwrap();
    assert_eq!(titles_of(&tasks), vec!["A", "B"]);
    assert_eq!(orders_of(&tasks), vec![0, 1]);
}

#[tokio::test]
async fn cross_list_move_appends_keeps_identity_and_redenses_source() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list_x = seed_list(&manager, &board, "Todo").await;
    let list_y = seed_list(&manager, &board, "Doing").await;
    let x_ids = seed_tasks(&manager, &list_x, &["A", "B", "C"]).await;
    seed_tasks(&manager, &list_y, &["P", "Q"]).await;

    // Drag B out of X onto the top of Y. The destination index is not
    // honored for placement: the task always lands at the end.
    let outcome = manager
        .apply_drag(&board, &drag(&list_x, 1, Some((&list_y, 0))))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DragOutcome::Moved {
            task_id: x_ids[1].clone(),
            from_list: list_x.clone(),
            to_list: list_y.clone(),
        }
    );

    let dest = manager.gateway().fetch_tasks(&list_y).await.unwrap();
    assert_eq!(titles_of(&dest), vec!["P", "Q", "B"]);
    assert_eq!(orders_of(&dest), vec![0, 1, 2]);

    let source = manager.gateway().fetch_tasks(&list_x).await.unwrap();
    assert_eq!(titles_of(&source), vec!["A", "C"]);
    assert_eq!(orders_of(&source), vec![0, 1]);

    // Identity preserved: same record id, now owned by the destination list
    let moved = manager.gateway().get_task(&x_ids[1]).await.unwrap().unwrap();
    assert_eq!(moved.list.to_string(), list_y);
    assert_eq!(moved.order, 2);
}

#[tokio::test]
async fn cross_list_move_into_empty_list() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list_x = seed_list(&manager, &board, "Todo").await;
    let list_y = seed_list(&manager, &board, "Done").await;
    seed_tasks(&manager, &list_x, &["A"]).await;

    manager
        .apply_drag(&board, &drag(&list_x, 0, Some((&list_y, 0))))
        .await
        .unwrap();

    let dest = manager.gateway().fetch_tasks(&list_y).await.unwrap();
    assert_eq!(titles_of(&dest), vec!["A"]);
    assert_eq!(orders_of(&dest), vec![0]);
    assert!(manager.gateway().fetch_tasks(&list_x).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_task_repacks_survivors() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list = seed_list(&manager, &board, "Todo").await;
    let ids = seed_tasks(&manager, &list, &["A", "B", "C"]).await;

    let deleted = manager.delete_task(&ids[1]).await.unwrap();
    assert_eq!(deleted.title, "B");

    let tasks = manager.gateway().fetch_tasks(&list).await.unwrap();
    assert_eq!(titles_of(&tasks), vec!["A", "C"]);
    assert_eq!(orders_of(&tasks), vec![0, 1]);
}

#[tokio::test]
async fn out_of_range_drag_is_rejected() {
    let (manager, _tmp) = create_test_manager().await;
    let board = seed_board(&manager, "Sprint").await;
    let list = seed_list(&manager, &board, "Todo").await;
    seed_tasks(&manager, &list, &["A"]).await;

    let err = manager
        .apply_drag(&board, &drag(&list, 5, Some((&list, 0))))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::InvalidDrag(_)));
}

#[tokio::test]
async fn concurrent_drags_on_one_list_stay_dense() {
    let (manager, _tmp) = create_test_manager().await;
    let manager = Arc::new(manager);
    let board = seed_board(&manager, "Sprint").await;
    let list = seed_list(&manager, &board, "Todo").await;
    seed_tasks(&manager, &list, &["A", "B", "C", "D"]).await;

    // Whatever order the per-list lock grants, the final ranks must be
    // exactly {0..n-1}.
    let first = manager.apply_drag(&board, &drag(&list, 0, Some((&list, 3))));
    let second = manager.apply_drag(&board, &drag(&list, 3, Some((&list, 0))));
    let (a, b) = tokio::join!(first, second);
    a.unwrap();
    b.unwrap();

    let tasks = manager.gateway().fetch_tasks(&list).await.unwrap();
    assert_eq!(orders_of(&tasks), vec![0, 1, 2, 3]);
}
