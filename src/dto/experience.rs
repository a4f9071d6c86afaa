use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::ExperienceLevelEntity;

/// Experience level reference entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExperienceLevelResponse {
    /// Primary key.
    #[serde(rename = "_id")]
    pub id: i64,
    /// Short level name.
    pub level: String,
    /// Display color.
    pub color: String,
    /// Human-readable description.
    pub label: String,
}

impl From<ExperienceLevelEntity> for ExperienceLevelResponse {
    fn from(entity: ExperienceLevelEntity) -> Self {
        Self {
            id: entity.id,
            level: entity.level,
            color: entity.color,
            label: entity.label,
        }
    }
}
