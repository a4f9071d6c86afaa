use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    routing::{get, patch},
};

use crate::{
    dto::tip::{TipResponse, TipsQuery},
    error::AppError,
    services::tip_service,
    state::SharedState,
};

/// Tip listing, lookup and likes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/tips", get(list_tips))
        .route("/tips/{id}", get(get_tip))
        .route("/tips/{id}/like", patch(like_tip))
}

/// List tips, narrowed by whichever filters are supplied.
#[utoipa::path(
    get,
    path = "/tips",
    tag = "tips",
    params(TipsQuery),
    responses(
        (status = 200, description = "Matching tips", body = [TipResponse]),
        (status = 400, description = "Malformed game identifier"),
        (status = 422, description = "Unparseable query parameter")
    )
)]
pub async fn list_tips(
    State(state): State<SharedState>,
    query: Result<Query<TipsQuery>, QueryRejection>,
) -> Result<Json<Vec<TipResponse>>, AppError> {
    let Query(query) = query?;
    let tips = tip_service::list_tips(&state, query).await?;
    Ok(Json(tips))
}

/// Fetch one tip; `null` when no tip has this id.
#[utoipa::path(
    get,
    path = "/tips/{id}",
    tag = "tips",
    params(("id" = String, Path, description = "24-character hexadecimal tip identifier")),
    responses(
        (status = 200, description = "Tip, or null", body = Option<TipResponse>),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn get_tip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Option<TipResponse>>, AppError> {
    let tip = tip_service::get_tip(&state, &id).await?;
    Ok(Json(tip))
}

/// Add one like to a tip and return the updated tip.
#[utoipa::path(
    patch,
    path = "/tips/{id}/like",
    tag = "tips",
    params(("id" = String, Path, description = "24-character hexadecimal tip identifier")),
    responses(
        (status = 200, description = "Tip after the like was applied", body = TipResponse),
        (status = 304, description = "The update had no effect"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No tip has this identifier")
    )
)]
pub async fn like_tip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TipResponse>, AppError> {
    let tip = tip_service::like_tip(&state, &id).await?;
    Ok(Json(tip))
}
