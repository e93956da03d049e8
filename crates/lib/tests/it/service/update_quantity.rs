use crate::helpers::*;

#[tokio::test]
async fn test_update_quantity_changes_only_matching_item() {
    let (service, store) = test_service().await;
    store.seed(example_list("L1")).await;

    let list = service
        .update_quantity("L1", item_id(234), 7)
        .await
        .unwrap()
        .expect("list should exist");

    let b = list.item(item_id(234)).unwrap();
    let a = list.item(item_id(123)).unwrap();
    assert_eq!(b.quantity, 7);
    assert_eq!(a.quantity, 3);
    // Order, descriptions and positions are untouched
    assert_eq!(descriptions(&list), ["b", "a"]);
    assert_eq!(b.position, 0);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_update_quantity_non_matching_item_still_writes() {
    let (service, store) = test_service().await;
    let seeded = store.seed(example_list("L1")).await;

    let list = service
        .update_quantity("L1", item_id(999), 5)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(list.items(), seeded.items());
    assert_eq!(list.version, seeded.version + 1);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_update_quantity_rejects_zero() {
    let (service, store) = test_service().await;
    let seeded = store.seed(example_list("L1")).await;

    let err = service
        .update_quantity("L1", item_id(234), 0)
        .await
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(err.is_invalid_quantity());
    assert_eq!(store.writes(), 0);
    assert_eq!(store.peek("L1").await, Some(seeded));
}

#[tokio::test]
async fn test_update_quantity_rejects_negative_for_any_item() {
    let (service, store) = test_service().await;
    store.seed(example_list("L1")).await;

    for target in [234, 999] {
        let err = service
            .update_quantity("L1", item_id(target), -4)
            .await
            .unwrap_err();
        assert!(err.is_invalid_quantity());
    }
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_update_quantity_on_missing_list() {
    let (service, store) = test_service().await;

    let result = service.update_quantity("missing", item_id(1), 3).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_update_quantity_on_missing_list_skips_validation() {
    let (service, store) = test_service().await;

    // The quantity is only checked once the list is found
    let result = service.update_quantity("missing", item_id(1), 0).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(store.writes(), 0);
}
