use crate::helpers::*;

#[tokio::test]
async fn test_delete_item_removes_matching_item() {
    let (service, store) = test_service().await;
    store.seed(example_list("L1")).await;

    let list = service
        .delete_item("L1", item_id(234))
        .await
        .unwrap()
        .expect("list should exist");

    assert_eq!(descriptions(&list), ["a"]);
    assert_eq!(list.items()[0].id, item_id(123));
    assert_eq!(store.writes(), 1);
    assert_eq!(store.peek("L1").await, Some(list));
}

#[tokio::test]
async fn test_delete_item_removes_every_duplicate_id() {
    let (service, store) = test_service().await;
    let mut seeded = example_list("L1");
    let mut duplicate = seeded.items()[0].clone();
    duplicate.description = "b again".to_string();
    seeded.list.push(duplicate);
    store.seed(seeded).await;

    let list = service.delete_item("L1", item_id(234)).await.unwrap().unwrap();

    assert_eq!(descriptions(&list), ["a"]);
}

#[tokio::test]
async fn test_delete_non_matching_item_still_writes() {
    let (service, store) = test_service().await;
    let seeded = store.seed(example_list("L1")).await;

    let list = service
        .delete_item("L1", item_id(999))
        .await
        .unwrap()
        .expect("a non-matching id still yields the list");

    assert_eq!(list.items(), seeded.items());
    assert_eq!(store.writes(), 1);
    assert_eq!(list.version, seeded.version + 1);
}

#[tokio::test]
async fn test_delete_item_from_missing_list() {
    let (service, store) = test_service().await;

    let result = service.delete_item("missing", item_id(234)).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(store.reads(), 1);
    assert_eq!(store.writes(), 0);
    assert_eq!(store.peek("missing").await, None);
}

#[tokio::test]
async fn test_delete_all_empties_list() {
    let (service, store) = test_service().await;
    store.seed(example_list("L1")).await;

    let list = service.delete_all("L1").await.unwrap().unwrap();

    assert!(list.is_empty());
    assert_eq!(list.id, "L1");
    assert_eq!(store.writes(), 1);

    // The emptied list is still stored
    let stored = store.peek("L1").await.expect("cleared list should persist");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_delete_all_on_empty_list_still_writes() {
    let (service, store) = test_service().await;
    let seeded = store.seed(shoplist::ShoppingList::new("L1")).await;

    let list = service.delete_all("L1").await.unwrap().unwrap();

    assert!(list.is_empty());
    assert_eq!(list.version, seeded.version + 1);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_delete_all_on_missing_list() {
    let (service, store) = test_service().await;

    assert_eq!(service.delete_all("missing").await.unwrap(), None);
    assert_eq!(store.writes(), 0);
    assert_eq!(store.peek("missing").await, None);
}

#[tokio::test]
async fn test_add_after_delete_all() {
    let (service, store) = test_service().await;
    store.seed(example_list("L1")).await;

    service.delete_all("L1").await.unwrap();
    let list = service.add_item("L1", "milk", 1).await.unwrap();

    assert_eq!(descriptions(&list), ["milk"]);
    assert_eq!(list.items()[0].position, 2);
}
