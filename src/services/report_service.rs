use tracing::info;
use validator::Validate;

use crate::{
    dao::{
        catalog_store::{CollectionName, Filter},
        models::{NewReportEntity, ReportEntity},
        object_id::parse_id,
    },
    dto::report::{CreateReportRequest, ReportResponse, ReportsQuery},
    error::ServiceError,
    services::decode::{decode, decode_all},
    state::SharedState,
};

const COLLECTION: CollectionName = CollectionName::Reports;

/// Return every report, or only those filed against `tip_id` when supplied.
pub async fn list_reports(
    state: &SharedState,
    query: ReportsQuery,
) -> Result<Vec<ReportResponse>, ServiceError> {
    let filter = match query.tip_id.as_deref() {
        Some(raw) => Filter::all().eq("tip_id", parse_id(raw)?),
        None => Filter::all(),
    };

    let documents = state.store().find_many(COLLECTION, filter).await?;
    decode_all(COLLECTION, &documents, ReportEntity::from_document)
}

/// File a report against an existing tip and return it as persisted.
pub async fn create_report(
    state: &SharedState,
    request: CreateReportRequest,
) -> Result<ReportResponse, ServiceError> {
    request.validate()?;
    let CreateReportRequest {
        tip_id,
        reason,
        description,
    } = request;
    let tip_id = parse_id(&tip_id)?;
    let store = state.store();

    let tip = store
        .find_one(CollectionName::Tips, Filter::by_id(tip_id))
        .await?;
    if tip.is_none() {
        return Err(ServiceError::Unprocessable(format!(
            "Could not find tip with ID {tip_id}"
        )));
    }

    let report = NewReportEntity {
        tip_id,
        reason,
        description,
    };
    let report_id = store.insert_one(COLLECTION, report.to_document()).await?;

    let Some(document) = store.find_one(COLLECTION, Filter::by_id(report_id)).await? else {
        return Err(ServiceError::Unprocessable(format!(
            "Unable to find report with ID {report_id}"
        )));
    };

    let report = decode(COLLECTION, &document, ReportEntity::from_document)?;
    info!(report_id = %report.id, tip_id = %report.tip_id, reason = %report.reason, "tip reported");
    Ok(report.into())
}
