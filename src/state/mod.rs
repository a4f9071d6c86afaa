use std::{sync::Arc, time::Duration};

use crate::dao::catalog_store::CatalogStore;

/// Handle given to every handler through axum `State`.
pub type SharedState = Arc<AppState>;
/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Handles shared by every request. Holds no per-request or cached data.
pub struct AppState {
    store: Arc<dyn CatalogStore>,
    request_timeout: Duration,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn CatalogStore>) -> SharedState {
        Self::with_request_timeout(store, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Same as [`AppState::new`] with an explicit per-request timeout.
    pub fn with_request_timeout(
        store: Arc<dyn CatalogStore>,
        request_timeout: Duration,
    ) -> SharedState {
        Arc::new(Self {
            store,
            request_timeout,
        })
    }

    /// Persistence gateway injected at startup.
    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    /// Upper bound on the time spent serving one request.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
