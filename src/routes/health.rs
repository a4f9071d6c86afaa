use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::health::{HealthResponse, RootResponse},
    services::health_service,
    state::SharedState,
};

/// Liveness routes: the greeting on `/` and the database-aware health check.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/", get(root))
        .route("/healthcheck", get(healthcheck))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses((status = 200, description = "Greeting", body = RootResponse))
)]
/// Fixed greeting, useful to check the server answers at all.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// `ok` when the database answered a ping, `degraded` otherwise. Always 200.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn healthcheck(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(health_service::health_status(&state).await)
}
