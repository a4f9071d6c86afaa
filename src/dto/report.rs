use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    dao::models::{Reason, ReportEntity},
    dto::validation::validate_object_id,
};

/// Public projection of a report.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    /// 24-character hexadecimal identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Identifier of the reported tip.
    pub tip_id: String,
    /// Why the tip was reported.
    pub reason: Reason,
    /// Free-text body.
    pub description: String,
}

impl From<ReportEntity> for ReportResponse {
    fn from(entity: ReportEntity) -> Self {
        Self {
            id: entity.id.to_hex(),
            tip_id: entity.tip_id.to_hex(),
            reason: entity.reason,
            description: entity.description,
        }
    }
}

/// Optional filter accepted by `GET /reports`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportsQuery {
    /// Only reports filed against this tip.
    pub tip_id: Option<String>,
}

/// Payload used to report a tip.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateReportRequest {
    /// Identifier of the reported tip.
    #[validate(custom(function = "validate_object_id"))]
    pub tip_id: String,
    /// Why the tip was reported.
    pub reason: Reason,
    /// Free-text body.
    pub description: String,
}
