use tracing::warn;

use crate::{
    dto::health::{HealthResponse, HealthStatus},
    state::SharedState,
};

/// Ping the store and report whether it answered.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let status = match state.store().health_check().await {
        Ok(()) => HealthStatus::Ok,
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthStatus::Degraded
        }
    };
    status.into()
}
