use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};

use crate::{
    dto::report::{CreateReportRequest, ReportResponse, ReportsQuery},
    error::AppError,
    services::report_service,
    state::SharedState,
};

/// Report listing and creation routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/reports", get(list_reports).post(create_report))
}

/// List reports, optionally only those filed against one tip.
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    params(ReportsQuery),
    responses(
        (status = 200, description = "Matching reports", body = [ReportResponse]),
        (status = 400, description = "Malformed tip identifier")
    )
)]
pub async fn list_reports(
    State(state): State<SharedState>,
    query: Result<Query<ReportsQuery>, QueryRejection>,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    let Query(query) = query?;
    let reports = report_service::list_reports(&state, query).await?;
    Ok(Json(reports))
}

/// Report a tip as wrong, outdated or mistyped.
#[utoipa::path(
    post,
    path = "/reports",
    tag = "reports",
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report as stored", body = ReportResponse),
        (status = 422, description = "Invalid payload or unknown tip")
    )
)]
pub async fn create_report(
    State(state): State<SharedState>,
    payload: Result<Json<CreateReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, AppError> {
    let Json(payload) = payload?;
    let report = report_service::create_report(&state, payload).await?;
    Ok(Json(report))
}
