use crate::helpers::*;

#[tokio::test]
async fn test_add_creates_missing_list() {
    let (service, store) = test_service().await;

    let list = service.add_item("L1", "milk", 1).await.unwrap();

    assert_eq!(list.id, "L1");
    assert_eq!(list.len(), 1);
    let item = &list.items()[0];
    assert_eq!(item.description, "milk");
    assert_eq!(item.quantity, 1);
    assert_eq!(item.position, 0);
    assert_eq!(store.writes(), 1);

    // The returned list is what was stored
    assert_eq!(store.peek("L1").await, Some(list));
}

#[tokio::test]
async fn test_add_to_existing_list_appends_one_item() {
    let (service, store) = test_service().await;
    let seeded = store.seed(example_list("L1")).await;

    let list = service.add_item("L1", "eggs", 12).await.unwrap();

    assert_eq!(list.len(), seeded.len() + 1);
    assert_eq!(&list.items()[..2], seeded.items());
    let added = &list.items()[2];
    assert_eq!(added.description, "eggs");
    assert_eq!(added.quantity, 12);
    assert_eq!(store.reads(), 1);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_add_positions_follow_version() {
    let (service, _store) = test_service().await;

    service.add_item("L1", "milk", 1).await.unwrap();
    service.add_item("L1", "eggs", 6).await.unwrap();
    let list = service.add_item("L1", "bread", 2).await.unwrap();

    let positions: Vec<u64> = list.items().iter().map(|i| i.position).collect();
    assert_eq!(positions, [0, 1, 2]);
    assert_eq!(list.version, 3);
}

#[tokio::test]
async fn test_no_op_writes_advance_later_positions() {
    let (service, _store) = test_service().await;

    service.add_item("L1", "milk", 1).await.unwrap();
    // Nothing matches, but the list is still written and its version bumped
    service.delete_item("L1", item_id(42)).await.unwrap();
    let list = service.add_item("L1", "eggs", 6).await.unwrap();

    let positions: Vec<u64> = list.items().iter().map(|i| i.position).collect();
    assert_eq!(positions, [0, 2]);
}

#[tokio::test]
async fn test_add_generates_distinct_ids() {
    let (service, _store) = test_service().await;

    let mut list = service.add_item("L1", "milk", 1).await.unwrap();
    for n in 0..20 {
        list = service.add_item("L1", &format!("item {n}"), 1).await.unwrap();
    }

    let mut ids: Vec<u64> = list.items().iter().map(|i| i.id.value()).collect();
    assert!(ids.iter().all(|id| *id <= i64::MAX as u64));
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 21);
}

#[tokio::test]
async fn test_add_allows_duplicate_descriptions() {
    let (service, _store) = test_service().await;

    service.add_item("L1", "milk", 1).await.unwrap();
    let list = service.add_item("L1", "milk", 2).await.unwrap();

    assert_eq!(descriptions(&list), ["milk", "milk"]);
    assert_ne!(list.items()[0].id, list.items()[1].id);
}

#[tokio::test]
async fn test_add_rejects_non_positive_quantity() {
    let (service, store) = test_service().await;

    for quantity in [0, -1, i32::MIN] {
        let err = service.add_item("L1", "milk", quantity).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.is_invalid_quantity());
    }

    assert_eq!(store.writes(), 0);
    assert_eq!(store.peek("L1").await, None);
}

#[tokio::test]
async fn test_add_rejection_leaves_existing_list_unchanged() {
    let (service, store) = test_service().await;
    let seeded = store.seed(example_list("L1")).await;

    let err = service.add_item("L1", "milk", 0).await.unwrap_err();

    assert!(err.is_invalid_quantity());
    assert_eq!(store.writes(), 0);
    assert_eq!(store.peek("L1").await, Some(seeded));
}

#[tokio::test]
async fn test_lists_are_independent() {
    let (service, _store) = test_service().await;

    service.add_item("L1", "milk", 1).await.unwrap();
    let other = service.add_item("L2", "eggs", 6).await.unwrap();

    assert_eq!(descriptions(&other), ["eggs"]);
    assert_eq!(service.list_ids().await.unwrap(), ["L1", "L2"]);
}
