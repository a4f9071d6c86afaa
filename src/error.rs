use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::dao::{
    catalog_store::CollectionName, object_id::InvalidIdError, schema::SchemaError,
    storage::StorageError,
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend failed or is unreachable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// A path or query identifier is malformed.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),
    /// Request payload or parameters failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A mutation had no effect.
    #[error("not modified: {0}")]
    NotModified(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request refers to data that does not exist or could not be read back.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    /// A stored document does not match its schema.
    #[error("document in `{collection}` does not match its schema")]
    CorruptDocument {
        /// Collection the document came from.
        collection: CollectionName,
        /// What did not match.
        #[source]
        source: SchemaError,
    },
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// The request was well-formed but had no effect.
    #[error("{0}")]
    NotModified(String),
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Request content failed validation or referential checks.
    #[error("{0}")]
    UnprocessableEntity(String),
    /// The request did not complete in time.
    #[error("{0}")]
    GatewayTimeout(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => {
                error!(error = %source, "storage operation failed");
                AppError::Internal(source.to_string())
            }
            ServiceError::InvalidId(source) => AppError::BadRequest(source.to_string()),
            ServiceError::InvalidInput(message) => AppError::UnprocessableEntity(message),
            ServiceError::NotModified(message) => AppError::NotModified(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Unprocessable(message) => AppError::UnprocessableEntity(message),
            ServiceError::CorruptDocument { collection, source } => {
                error!(%collection, error = %source, "stored document failed validation");
                AppError::Internal(format!(
                    "document in `{collection}` does not match its schema: {source}"
                ))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::UnprocessableEntity(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotModified(_) => StatusCode::NOT_MODIFIED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, detail = %self, "request failed");
        } else {
            warn!(%status, detail = %self, "request rejected");
        }

        let payload = Json(ErrorBody {
            detail: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::object_id::parse_id;

    #[test]
    fn service_errors_map_to_documented_statuses() {
        let cases = [
            (
                ServiceError::from(parse_id("bad").unwrap_err()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::InvalidInput("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::NotModified("x".into()),
                StatusCode::NOT_MODIFIED,
            ),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ServiceError::Unprocessable("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::from(StorageError::rejected(CollectionName::Reports, "x")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::CorruptDocument {
                    collection: CollectionName::Tips,
                    source: SchemaError::Missing { field: "likes" },
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }
}
