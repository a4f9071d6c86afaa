use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::{error::AppError, state::SharedState};

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// Experience level lookup.
pub mod experience;
/// Game catalogue.
pub mod games;
/// Greeting and health check.
pub mod health;
/// Report listing and creation.
pub mod reports;
/// Tip listing, lookup and likes.
pub mod tips;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(experience::router())
        .merge(games::router())
        .merge(tips::router())
        .merge(reports::router());

    let docs_router = docs::router(state.clone());

    api_router
        .merge(docs_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_request_timeout,
        ))
        .with_state(state)
}

/// Abort requests that outlive the configured timeout with a 504.
async fn enforce_request_timeout(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = state.request_timeout();
    tokio::time::timeout(limit, next.run(request))
        .await
        .map_err(|_| {
            AppError::GatewayTimeout(format!(
                "request did not complete within {} ms",
                limit.as_millis()
            ))
        })
}
