use shoplist::ShoppingList;

use crate::helpers::*;

#[tokio::test]
async fn test_store_basic_operations() {
    let store = test_store().await;

    // Nothing stored yet
    assert_eq!(store.get("L1").await.unwrap(), None);
    assert!(store.list_ids().await.unwrap().is_empty());

    let saved = store.upsert(example_list("L1")).await.unwrap();
    assert_eq!(saved.version, 1);
    assert_eq!(saved.items(), example_list("L1").items());

    let loaded = store.get("L1").await.unwrap().expect("list should be stored");
    assert_eq!(loaded, saved);
    assert_eq!(store.list_ids().await.unwrap(), ["L1"]);
}

#[tokio::test]
async fn test_store_replaces_on_upsert() {
    let store = test_store().await;
    let mut list = store.upsert(example_list("L1")).await.unwrap();

    list.clear();
    list.push_item("milk", 4);
    let saved = store.upsert(list).await.unwrap();
    assert_eq!(saved.version, 2);

    let loaded = store.get("L1").await.unwrap().unwrap();
    assert_eq!(descriptions(&loaded), ["milk"]);
    assert_eq!(loaded.items()[0].quantity, 4);
    assert_eq!(loaded.items()[0].position, 1);
}

#[tokio::test]
async fn test_store_keeps_empty_lists() {
    let store = test_store().await;

    let saved = store.upsert(ShoppingList::new("empty")).await.unwrap();

    assert!(saved.is_empty());
    assert_eq!(store.get("empty").await.unwrap(), Some(saved));
}

#[tokio::test]
async fn test_store_list_ids_sorted() {
    let store = test_store().await;
    for id in ["pantry", "bakery", "dairy"] {
        store.upsert(ShoppingList::new(id)).await.unwrap();
    }

    assert_eq!(store.list_ids().await.unwrap(), ["bakery", "dairy", "pantry"]);
}

#[tokio::test]
async fn test_store_preserves_item_fields() {
    let store = test_store().await;
    let mut list = ShoppingList::new("L1");
    list.version = 0;
    list.list.push(shoplist::ListItem {
        description: "ünïcode & \"quotes\"".to_string(),
        position: 17,
        quantity: i32::MAX,
        id: item_id(i64::MAX as u64),
    });

    store.upsert(list.clone()).await.unwrap();
    let loaded = store.get("L1").await.unwrap().unwrap();

    assert_eq!(loaded.items(), list.items());
}
