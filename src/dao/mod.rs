/// Persistence gateway over the catalog collections.
pub mod catalog_store;
/// Database model definitions.
pub mod models;
/// Identifier parsing shared by the API and the batch tools.
pub mod object_id;
/// Typed access to raw documents.
pub mod schema;
/// Storage abstraction layer for database operations.
pub mod storage;
