//! Startup and shutdown of the persistence connection.

use tracing::{info, warn};

use crate::{
    config::DatabaseSettings,
    dao::catalog_store::{
        CatalogStore,
        mongodb::{MongoCatalogStore, MongoConfig, MongoResult},
    },
};

/// Build the MongoDB client and check the server answers a ping.
///
/// A failed ping is only logged: the store is returned anyway and errors
/// surface on the first real query.
pub async fn connect(settings: &DatabaseSettings) -> MongoResult<MongoCatalogStore> {
    let config = MongoConfig::from_uri(&settings.uri, &settings.database_name).await?;
    let store = MongoCatalogStore::connect(config)?;

    match store.ping().await {
        Ok(()) => info!(
            database = store.database_name(),
            "connected to the MongoDB database"
        ),
        Err(err) => warn!(
            database = store.database_name(),
            error = %err,
            "MongoDB ping failed at startup; continuing without a verified connection"
        ),
    }

    Ok(store)
}

/// Release the persistence connection once the server stopped serving.
pub async fn shutdown(store: &dyn CatalogStore) {
    store.close().await;
    info!("storage connection closed");
}
