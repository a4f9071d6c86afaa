use std::error::Error;

use thiserror::Error;

use crate::dao::catalog_store::CollectionName;

/// Result alias for catalog store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by any [`CatalogStore`](crate::dao::catalog_store::CatalogStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not serve the operation at all.
    #[error("catalog storage failed: {source}")]
    Backend {
        /// Underlying backend error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend refused a write on `collection`.
    #[error("`{collection}` rejected the operation: {reason}")]
    Rejected {
        /// Collection the operation targeted.
        collection: CollectionName,
        /// Why the backend refused it.
        reason: String,
    },
}

impl StorageError {
    /// Wrap any backend failure.
    pub fn backend(source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Backend {
            source: Box::new(source),
        }
    }

    /// Refusal of an operation on `collection`.
    pub fn rejected(collection: CollectionName, reason: impl Into<String>) -> Self {
        StorageError::Rejected {
            collection,
            reason: reason.into(),
        }
    }
}
