use std::{any::Any, sync::Arc};

use async_trait::async_trait;
use shoplist::{
    ListService, Result, ShoppingList,
    backend::{ListStore, database::InMemory},
};

use crate::helpers::*;

/// Store that lets a competing writer slip in between every read and the caller's write.
struct InterleavingStore {
    inner: InMemory,
}

#[async_trait]
impl ListStore for InterleavingStore {
    async fn get(&self, id: &str) -> Result<Option<ShoppingList>> {
        let snapshot = self.inner.get(id).await?;
        if let Some(ref list) = snapshot {
            let mut competing = list.clone();
            competing.push_item("from another writer", 1);
            self.inner.upsert(competing).await?;
        }
        Ok(snapshot)
    }

    async fn upsert(&self, list: ShoppingList) -> Result<ShoppingList> {
        self.inner.upsert(list).await
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        self.inner.list_ids().await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[tokio::test]
async fn test_stale_write_surfaces_version_conflict() {
    let store = InterleavingStore {
        inner: InMemory::new(),
    };
    store.inner.upsert(example_list("L1")).await.unwrap();
    let service = ListService::new(Arc::new(store));

    let err = service.add_item("L1", "milk", 1).await.unwrap_err();

    assert!(err.is_version_conflict());
    assert!(err.is_store_error());
    assert!(!err.is_invalid_argument());
}

#[tokio::test]
async fn test_conflicting_write_is_not_retried() {
    let store = Arc::new(InterleavingStore {
        inner: InMemory::new(),
    });
    store.inner.upsert(example_list("L1")).await.unwrap();
    let service = ListService::new(store.clone());

    assert!(service.delete_all("L1").await.unwrap_err().is_version_conflict());

    // Only the competing writer's item landed; the clear was dropped
    let stored = store.inner.get("L1").await.unwrap().unwrap();
    assert_eq!(descriptions(&stored), ["b", "a", "from another writer"]);
}

#[tokio::test]
async fn test_missing_list_reads_do_not_conflict() {
    let service = ListService::new(Arc::new(InterleavingStore {
        inner: InMemory::new(),
    }));

    // Nothing exists to race against, so the first add creates the list
    let list = service.add_item("L1", "milk", 1).await.unwrap();
    assert_eq!(descriptions(&list), ["milk"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_to_same_list() {
    let (service, store) = test_service().await;
    service.add_item("L1", "seed", 1).await.unwrap();

    let mut handles = Vec::new();
    for n in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.add_item("L1", &format!("item {n}"), 1).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert!(e.is_version_conflict(), "unexpected error: {e}"),
        }
    }

    // Every successful write is reflected; no write silently overwrote another
    let stored = store.peek("L1").await.unwrap();
    assert!(succeeded >= 1);
    assert_eq!(stored.len(), 1 + succeeded);
    assert_eq!(stored.version, 1 + succeeded as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_to_different_lists() {
    let (service, _store) = test_service().await;

    let mut handles = Vec::new();
    for n in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.add_item(&format!("L{n:02}"), "milk", 1).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(service.list_ids().await.unwrap().len(), 16);
}
