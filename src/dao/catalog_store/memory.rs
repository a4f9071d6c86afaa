//! Process-local [`CatalogStore`] used by tests and local experiments.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use ::mongodb::bson::{Bson, Document, oid::ObjectId};
use futures::future::BoxFuture;
use tokio::sync::Mutex;

use super::{CatalogStore, CollectionName, Filter};
use crate::dao::{
    schema::bson_type_name,
    storage::{StorageError, StorageResult},
};

/// In-memory [`CatalogStore`] keeping documents in insertion order.
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    collections: Arc<Mutex<HashMap<CollectionName, Vec<Document>>>>,
    calls: Arc<AtomicU64>,
}

impl MemoryCatalogStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document as-is, bypassing the call counter.
    pub async fn seed(&self, collection: CollectionName, document: Document) {
        let mut guard = self.collections.lock().await;
        guard.entry(collection).or_default().push(document);
    }

    /// Snapshot of a collection's documents.
    pub async fn documents(&self, collection: CollectionName) -> Vec<Document> {
        let guard = self.collections.lock().await;
        guard.get(&collection).cloned().unwrap_or_default()
    }

    /// Number of gateway operations served so far (seeding excluded).
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> BoxFuture<'static, StorageResult<Option<Document>>> {
        self.record_call();
        let collections = self.collections.clone();
        Box::pin(async move {
            let guard = collections.lock().await;
            Ok(guard
                .get(&collection)
                .and_then(|documents| documents.iter().find(|doc| filter.matches(doc)))
                .cloned())
        })
    }

    fn find_many(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> BoxFuture<'static, StorageResult<Vec<Document>>> {
        self.record_call();
        let collections = self.collections.clone();
        Box::pin(async move {
            let guard = collections.lock().await;
            Ok(guard
                .get(&collection)
                .map(|documents| {
                    documents
                        .iter()
                        .filter(|doc| filter.matches(doc))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        })
    }

    fn insert_one(
        &self,
        collection: CollectionName,
        mut document: Document,
    ) -> BoxFuture<'static, StorageResult<ObjectId>> {
        self.record_call();
        let collections = self.collections.clone();
        Box::pin(async move {
            let id = match document.get("_id") {
                Some(Bson::ObjectId(id)) => *id,
                Some(other) => {
                    return Err(StorageError::rejected(
                        collection,
                        format!(
                            "in-memory store only accepts objectId keys, got {}",
                            bson_type_name(other)
                        ),
                    ));
                }
                None => {
                    let id = ObjectId::new();
                    document.insert("_id", id);
                    id
                }
            };

            let mut guard = collections.lock().await;
            let documents = guard.entry(collection).or_default();
            if documents
                .iter()
                .any(|doc| doc.get("_id") == Some(&Bson::ObjectId(id)))
            {
                return Err(StorageError::rejected(
                    collection,
                    format!("duplicate key `{id}`"),
                ));
            }
            documents.push(document);
            Ok(id)
        })
    }

    fn increment_field(
        &self,
        collection: CollectionName,
        filter: Filter,
        field: &'static str,
        delta: i32,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        self.record_call();
        let collections = self.collections.clone();
        Box::pin(async move {
            let mut guard = collections.lock().await;
            let Some(document) = guard
                .get_mut(&collection)
                .and_then(|documents| documents.iter_mut().find(|doc| filter.matches(doc)))
            else {
                return Ok(0);
            };

            let next = match document.get(field) {
                None => Bson::Int32(delta),
                Some(Bson::Int32(current)) => current
                    .checked_add(delta)
                    .map(Bson::Int32)
                    .unwrap_or_else(|| Bson::Int64(i64::from(*current) + i64::from(delta))),
                Some(Bson::Int64(current)) => match current.checked_add(i64::from(delta)) {
                    Some(next) => Bson::Int64(next),
                    None => {
                        return Err(StorageError::rejected(
                            collection,
                            format!("incrementing `{field}` overflows a 64-bit integer"),
                        ));
                    }
                },
                Some(Bson::Double(current)) => Bson::Double(current + f64::from(delta)),
                Some(other) => {
                    return Err(StorageError::rejected(
                        collection,
                        format!(
                            "cannot increment non-numeric field `{field}` of type {}",
                            bson_type_name(other)
                        ),
                    ));
                }
            };

            if delta == 0 {
                return Ok(0);
            }
            document.insert(field, next);
            Ok(1)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        Box::pin(async {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_id_and_find_returns_it() {
        let store = MemoryCatalogStore::new();
        let id = store
            .insert_one(CollectionName::Reports, doc! { "description": "x" })
            .await
            .unwrap();

        let found = store
            .find_one(CollectionName::Reports, Filter::by_id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("description"), Some(&Bson::String("x".into())));
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = MemoryCatalogStore::new();
        let id = ObjectId::new();
        store
            .insert_one(CollectionName::Games, doc! { "_id": id })
            .await
            .unwrap();
        let err = store
            .insert_one(CollectionName::Games, doc! { "_id": id })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Rejected { .. }));
    }

    #[tokio::test]
    async fn increment_reports_modified_count() {
        let store = MemoryCatalogStore::new();
        let id = ObjectId::new();
        store
            .seed(CollectionName::Tips, doc! { "_id": id, "likes": 3 })
            .await;

        let modified = store
            .increment_field(CollectionName::Tips, Filter::by_id(id), "likes", 1)
            .await
            .unwrap();
        assert_eq!(modified, 1);

        let missing = store
            .increment_field(
                CollectionName::Tips,
                Filter::by_id(ObjectId::new()),
                "likes",
                1,
            )
            .await
            .unwrap();
        assert_eq!(missing, 0);

        let documents = store.documents(CollectionName::Tips).await;
        assert_eq!(documents[0].get("likes"), Some(&Bson::Int32(4)));
    }

    #[tokio::test]
    async fn int64_overflow_is_rejected_and_leaves_value() {
        let store = MemoryCatalogStore::new();
        let id = ObjectId::new();
        store
            .seed(CollectionName::Tips, doc! { "_id": id, "likes": i64::MAX })
            .await;

        let err = store
            .increment_field(CollectionName::Tips, Filter::by_id(id), "likes", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Rejected { .. }));

        let documents = store.documents(CollectionName::Tips).await;
        assert_eq!(documents[0].get("likes"), Some(&Bson::Int64(i64::MAX)));
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = MemoryCatalogStore::new();
        let id = ObjectId::new();
        store
            .seed(CollectionName::Tips, doc! { "_id": id, "likes": 0 })
            .await;

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .increment_field(CollectionName::Tips, Filter::by_id(id), "likes", 1)
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let documents = store.documents(CollectionName::Tips).await;
        assert_eq!(documents[0].get("likes"), Some(&Bson::Int32(50)));
    }

    #[tokio::test]
    async fn find_many_keeps_insertion_order() {
        let store = MemoryCatalogStore::new();
        for n in 0..3 {
            store
                .seed(CollectionName::Games, doc! { "_id": ObjectId::new(), "n": n })
                .await;
        }

        let documents = store
            .find_many(CollectionName::Games, Filter::all())
            .await
            .unwrap();
        let order: Vec<_> = documents.iter().map(|doc| doc.get("n").cloned()).collect();
        assert_eq!(
            order,
            vec![Some(Bson::Int32(0)), Some(Bson::Int32(1)), Some(Bson::Int32(2))]
        );
    }
}
