use mongodb::bson::Document;

use crate::{
    dao::{catalog_store::CollectionName, schema::SchemaError},
    error::ServiceError,
};

/// Validate a raw document with its entity parser, tagging failures with the collection.
pub(crate) fn decode<T>(
    collection: CollectionName,
    document: &Document,
    parse: fn(&Document) -> Result<T, SchemaError>,
) -> Result<T, ServiceError> {
    parse(document).map_err(|source| ServiceError::CorruptDocument { collection, source })
}

/// [`decode`] applied to every document of a listing.
pub(crate) fn decode_all<T, R: From<T>>(
    collection: CollectionName,
    documents: &[Document],
    parse: fn(&Document) -> Result<T, SchemaError>,
) -> Result<Vec<R>, ServiceError> {
    documents
        .iter()
        .map(|document| decode(collection, document, parse).map(R::from))
        .collect()
}
