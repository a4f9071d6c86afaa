use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::dao::models::TipEntity;

/// Public projection of a tip.
#[derive(Debug, Serialize, ToSchema)]
pub struct TipResponse {
    /// 24-character hexadecimal identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Identifier of the game the tip belongs to.
    pub game_id: String,
    /// Experience level the tip targets (1 to 3).
    pub experience_id: i64,
    /// Whether the tip is free of story spoilers.
    pub spoiler_free: bool,
    /// Display title.
    pub title: String,
    /// Free-text body.
    pub description: String,
    /// Number of likes received.
    pub likes: i64,
}

impl From<TipEntity> for TipResponse {
    fn from(entity: TipEntity) -> Self {
        Self {
            id: entity.id.to_hex(),
            game_id: entity.game_id.to_hex(),
            experience_id: entity.experience_id,
            spoiler_free: entity.spoiler_free,
            title: entity.title,
            description: entity.description,
            likes: entity.likes,
        }
    }
}

/// Optional filters accepted by `GET /tips`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TipsQuery {
    /// Only tips of this game (24-character hexadecimal identifier).
    pub game_id: Option<String>,
    /// Only tips targeting this experience level.
    pub experience: Option<i64>,
    /// When true, only spoiler-free tips. False does not filter.
    #[serde(default)]
    pub spoiler_free: bool,
}
