/// In-process store.
pub mod memory;
/// MongoDB store.
pub mod mongodb;

use std::fmt;

use futures::future::BoxFuture;
use ::mongodb::bson::{Bson, Document, oid::ObjectId};

use crate::dao::storage::StorageResult;

/// Collections holding the catalog documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Games,
    ExperienceLevels,
    Tips,
    Reports,
}

impl CollectionName {
    /// Name of the collection in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionName::Games => "games",
            CollectionName::ExperienceLevels => "experience_levels",
            CollectionName::Tips => "tips",
            CollectionName::Reports => "reports",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunction of field equality conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(&'static str, Bson)>,
}

impl Filter {
    /// Filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching the document whose `_id` equals `id`.
    pub fn by_id(id: impl Into<Bson>) -> Self {
        Self::all().eq("_id", id)
    }

    /// Add an equality condition on `field`.
    pub fn eq(mut self, field: &'static str, value: impl Into<Bson>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    /// Field conditions in insertion order.
    pub fn conditions(&self) -> &[(&'static str, Bson)] {
        &self.conditions
    }

    /// Evaluate the filter against a document, comparing numbers by value.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            document
                .get(*field)
                .is_some_and(|actual| bson_values_equal(actual, expected))
        })
    }

    /// Query document understood by MongoDB.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        for (field, value) in &self.conditions {
            document.insert(*field, value.clone());
        }
        document
    }
}

fn bson_values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

/// Abstraction over the persistence service holding the catalog collections.
///
/// Implementations return raw documents; interpreting them is left to callers.
pub trait CatalogStore: Send + Sync {
    /// First document matching `filter`, if any.
    fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> BoxFuture<'static, StorageResult<Option<Document>>>;
    /// Every document matching `filter`, in natural order.
    fn find_many(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> BoxFuture<'static, StorageResult<Vec<Document>>>;
    /// Insert a document and return the identifier assigned to it.
    fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> BoxFuture<'static, StorageResult<ObjectId>>;
    /// Atomically add `delta` to `field` on the first matching document and
    /// return the number of modified documents.
    fn increment_field(
        &self,
        collection: CollectionName,
        filter: Filter,
        field: &'static str,
        delta: i32,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    /// Cheap round-trip proving the backend answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Release the underlying connection.
    fn close(&self) -> BoxFuture<'static, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::mongodb::bson::doc;

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().matches(&doc! {}));
        assert!(Filter::all().matches(&doc! { "a": 1 }));
        assert_eq!(Filter::all().to_document(), doc! {});
    }

    #[test]
    fn numbers_compare_across_widths() {
        let filter = Filter::by_id(1_i64);
        assert!(filter.matches(&doc! { "_id": 1_i32 }));
        assert!(filter.matches(&doc! { "_id": 1.0_f64 }));
        assert!(!filter.matches(&doc! { "_id": 2_i32 }));
        assert!(!filter.matches(&doc! { "_id": "1" }));
    }

    #[test]
    fn conditions_are_conjunctive() {
        let game = ObjectId::new();
        let filter = Filter::all().eq("game_id", game).eq("experience_id", 2_i64);

        assert!(filter.matches(&doc! { "game_id": game, "experience_id": 2 }));
        assert!(!filter.matches(&doc! { "game_id": game, "experience_id": 3 }));
        assert!(!filter.matches(&doc! { "experience_id": 2 }));
        assert_eq!(
            filter.to_document(),
            doc! { "game_id": game, "experience_id": 2_i64 }
        );
    }
}
