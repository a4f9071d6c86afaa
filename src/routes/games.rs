use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::game::GameResponse, error::AppError, services::game_service, state::SharedState,
};

/// Read-only game catalogue routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games))
        .route("/games/{id}", get(get_game))
}

/// List every game.
#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    responses((status = 200, description = "All games", body = [GameResponse]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let games = game_service::list_games(&state).await?;
    Ok(Json(games))
}

/// Fetch one game; `null` when no game has this id.
#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "24-character hexadecimal game identifier")),
    responses(
        (status = 200, description = "Game, or null", body = Option<GameResponse>),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Option<GameResponse>>, AppError> {
    let game = game_service::get_game(&state, &id).await?;
    Ok(Json(game))
}
