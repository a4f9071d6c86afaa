use serde::Serialize;
use utoipa::ToSchema;

/// Whether the database answered the last ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The database answered its ping.
    Ok,
    /// The database did not answer.
    Degraded,
}

/// Body of `GET /healthcheck`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Database reachability.
    pub status: HealthStatus,
}

impl From<HealthStatus> for HealthResponse {
    fn from(status: HealthStatus) -> Self {
        Self { status }
    }
}

/// Greeting served on `/`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting text.
    pub message: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "Hello, world!".to_owned(),
        }
    }
}
