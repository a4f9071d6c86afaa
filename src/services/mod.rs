/// Helpers turning raw documents into entities.
mod decode;
/// OpenAPI documentation generation.
pub mod documentation;
/// Export and import of whole databases as JSON.
pub mod dump_service;
/// Experience level lookups.
pub mod experience_service;
/// Game lookups.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Report listing and creation.
pub mod report_service;
/// Connection setup and teardown.
pub mod storage_lifecycle;
/// Tip lookups and likes.
pub mod tip_service;
