use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc, oid::ObjectId},
};

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};
use crate::dao::{
    catalog_store::{CatalogStore, CollectionName, Filter},
    storage::StorageResult,
};

/// MongoDB-backed [`CatalogStore`].
///
/// The driver pools connections internally, so clones share one client.
#[derive(Clone)]
pub struct MongoCatalogStore {
    client: Client,
    database: Database,
}

impl MongoCatalogStore {
    /// Build the client for `config`. No network round-trip happens here; use
    /// [`MongoCatalogStore::ping`] to check the server is reachable.
    pub fn connect(config: MongoConfig) -> MongoResult<Self> {
        let client = Client::with_options(config.options)
            .map_err(|source| MongoDaoError::ClientConstruction { source })?;
        let database = client.database(&config.database_name);
        Ok(Self { client, database })
    }

    /// Name of the database the store reads from.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Run the `ping` command against the database.
    pub async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.database.collection::<Document>(name.as_str())
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> MongoResult<Option<Document>> {
        self.collection(collection)
            .find_one(filter.to_document())
            .await
            .map_err(|source| MongoDaoError::FindOne {
                collection: collection.as_str(),
                source,
            })
    }

    async fn find_many(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> MongoResult<Vec<Document>> {
        self.find_raw(collection.as_str(), filter.to_document())
            .await
    }

    async fn find_raw(&self, collection: &str, filter: Document) -> MongoResult<Vec<Document>> {
        self.database
            .collection::<Document>(collection)
            .find(filter)
            .await
            .map_err(|source| MongoDaoError::FindMany {
                collection: collection.to_owned(),
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::FindMany {
                collection: collection.to_owned(),
                source,
            })
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> MongoResult<ObjectId> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|source| MongoDaoError::InsertOne {
                collection: collection.as_str(),
                source,
            })?;

        result
            .inserted_id
            .as_object_id()
            .ok_or(MongoDaoError::UnexpectedInsertedId {
                collection: collection.as_str(),
            })
    }

    async fn increment_field(
        &self,
        collection: CollectionName,
        filter: Filter,
        field: &'static str,
        delta: i32,
    ) -> MongoResult<u64> {
        let mut increment = Document::new();
        increment.insert(field, delta);

        // Single `$inc` so concurrent likes are applied by the server atomically.
        let result = self
            .collection(collection)
            .update_one(filter.to_document(), doc! { "$inc": increment })
            .await
            .map_err(|source| MongoDaoError::Increment {
                collection: collection.as_str(),
                field,
                source,
            })?;

        Ok(result.modified_count)
    }

    /// Names of every collection in the database.
    pub async fn collection_names(&self) -> MongoResult<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(|source| MongoDaoError::ListCollections { source })
    }

    /// Every document of an arbitrary collection, in natural order.
    pub async fn dump_collection(&self, collection: &str) -> MongoResult<Vec<Document>> {
        self.find_raw(collection, doc! {}).await
    }

    /// Delete every document of `collection`, returning how many were removed.
    pub async fn clear_collection(&self, collection: &str) -> MongoResult<u64> {
        let result = self
            .database
            .collection::<Document>(collection)
            .delete_many(doc! {})
            .await
            .map_err(|source| MongoDaoError::ClearCollection {
                collection: collection.to_owned(),
                source,
            })?;
        Ok(result.deleted_count)
    }

    /// Bulk insert into an arbitrary collection.
    pub async fn insert_documents(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> MongoResult<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let result = self
            .database
            .collection::<Document>(collection)
            .insert_many(documents)
            .await
            .map_err(|source| MongoDaoError::InsertMany {
                collection: collection.to_owned(),
                source,
            })?;
        Ok(result.inserted_ids.len())
    }
}

impl CatalogStore for MongoCatalogStore {
    fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> BoxFuture<'static, StorageResult<Option<Document>>> {
        let store = self.clone();
        Box::pin(async move { store.find_one(collection, filter).await.map_err(Into::into) })
    }

    fn find_many(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> BoxFuture<'static, StorageResult<Vec<Document>>> {
        let store = self.clone();
        Box::pin(async move { store.find_many(collection, filter).await.map_err(Into::into) })
    }

    fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> BoxFuture<'static, StorageResult<ObjectId>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .insert_one(collection, document)
                .await
                .map_err(Into::into)
        })
    }

    fn increment_field(
        &self,
        collection: CollectionName,
        filter: Filter,
        field: &'static str,
        delta: i32,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .increment_field(collection, filter, field, delta)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        let client = self.client.clone();
        Box::pin(async move { client.shutdown().await })
    }
}
