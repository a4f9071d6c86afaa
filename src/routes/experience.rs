use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};

use crate::{
    dto::experience::ExperienceLevelResponse, error::AppError, services::experience_service,
    state::SharedState,
};

/// Experience level lookup route.
pub fn router() -> Router<SharedState> {
    Router::new().route("/experience/{id}", get(get_experience_level))
}

/// Fetch one experience level by its integer id; `null` when absent.
#[utoipa::path(
    get,
    path = "/experience/{id}",
    tag = "experience",
    params(("id" = i64, Path, description = "Integer identifier of the experience level")),
    responses(
        (status = 200, description = "Experience level, or null", body = Option<ExperienceLevelResponse>),
        (status = 422, description = "Identifier is not an integer")
    )
)]
pub async fn get_experience_level(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Option<ExperienceLevelResponse>>, AppError> {
    let Path(id) = id?;
    let level = experience_service::get_experience_level(&state, id).await?;
    Ok(Json(level))
}
