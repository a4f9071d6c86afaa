use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::GameEntity;

/// Public projection of a game.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameResponse {
    /// 24-character hexadecimal identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-text body.
    pub description: String,
}

impl From<GameEntity> for GameResponse {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id.to_hex(),
            title: entity.title,
            description: entity.description,
        }
    }
}
