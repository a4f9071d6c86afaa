//! Typed field access over raw BSON documents returned by the catalog store.

use mongodb::bson::{Bson, Document, oid::ObjectId};
use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::object_id::{InvalidIdError, parse_id};

/// Raised when a stored document does not match the shape of its entity.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required field is absent.
    #[error("missing field `{field}`")]
    Missing {
        /// Name of the absent field.
        field: &'static str,
    },
    /// A field holds a value of another BSON type.
    #[error("field `{field}` should be {expected}, found {found}")]
    WrongType {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the accepted type.
        expected: &'static str,
        /// BSON type actually stored.
        found: &'static str,
    },
    /// A string identifier field is not 24 lowercase hex characters.
    #[error("field `{field}` holds an invalid identifier")]
    InvalidId {
        /// Name of the offending field.
        field: &'static str,
        /// Codec failure.
        #[source]
        source: InvalidIdError,
    },
    /// `reason` is not one of the known report labels.
    #[error("field `reason` holds unknown label `{0}`")]
    UnknownReason(String),
    /// A range or length constraint failed.
    #[error("constraint violated: {0}")]
    Constraint(#[from] ValidationErrors),
}

/// Borrowing accessor that converts document fields into Rust values.
pub struct DocumentReader<'a> {
    document: &'a Document,
}

impl<'a> DocumentReader<'a> {
    /// Wrap `document` for typed reads.
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    fn field(&self, field: &'static str) -> Result<&'a Bson, SchemaError> {
        self.document
            .get(field)
            .ok_or(SchemaError::Missing { field })
    }

    /// Identifier stored either natively or as its 24-character hex form.
    pub fn object_id(&self, field: &'static str) -> Result<ObjectId, SchemaError> {
        match self.field(field)? {
            Bson::ObjectId(id) => Ok(*id),
            Bson::String(raw) => {
                parse_id(raw).map_err(|source| SchemaError::InvalidId { field, source })
            }
            other => Err(wrong_type(field, "an identifier", other)),
        }
    }

    /// Integer stored with any width; integral doubles are accepted too.
    pub fn integer(&self, field: &'static str) -> Result<i64, SchemaError> {
        match self.field(field)? {
            Bson::Int32(value) => Ok(i64::from(*value)),
            Bson::Int64(value) => Ok(*value),
            Bson::Double(value) if value.fract() == 0.0 && value.is_finite() => Ok(*value as i64),
            other => Err(wrong_type(field, "an integer", other)),
        }
    }

    /// Read a string field.
    pub fn string(&self, field: &'static str) -> Result<String, SchemaError> {
        match self.field(field)? {
            Bson::String(value) => Ok(value.clone()),
            other => Err(wrong_type(field, "a string", other)),
        }
    }

    /// Read a boolean field.
    pub fn boolean(&self, field: &'static str) -> Result<bool, SchemaError> {
        match self.field(field)? {
            Bson::Boolean(value) => Ok(*value),
            other => Err(wrong_type(field, "a boolean", other)),
        }
    }
}

fn wrong_type(field: &'static str, expected: &'static str, found: &Bson) -> SchemaError {
    SchemaError::WrongType {
        field,
        expected,
        found: bson_type_name(found),
    }
}

/// Short human name of a BSON value's type, used in diagnostics.
pub fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Double(_) => "double",
        Bson::String(_) => "string",
        Bson::Array(_) => "array",
        Bson::Document(_) => "document",
        Bson::Boolean(_) => "boolean",
        Bson::Null => "null",
        Bson::Int32(_) => "int32",
        Bson::Int64(_) => "int64",
        Bson::ObjectId(_) => "objectId",
        Bson::DateTime(_) => "date",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn object_id_accepts_native_and_hex_string() {
        let id = ObjectId::parse_str("64c3cdfbd54e7b39dc4b1d74").unwrap();
        let document = doc! { "a": id, "b": "64c3cdfbd54e7b39dc4b1d74" };
        let reader = DocumentReader::new(&document);

        assert_eq!(reader.object_id("a").unwrap(), id);
        assert_eq!(reader.object_id("b").unwrap(), id);
    }

    #[test]
    fn object_id_rejects_malformed_string() {
        let document = doc! { "a": "not-an-id", "b": 12 };
        let reader = DocumentReader::new(&document);

        assert!(matches!(
            reader.object_id("a"),
            Err(SchemaError::InvalidId { field: "a", .. })
        ));
        assert!(matches!(
            reader.object_id("b"),
            Err(SchemaError::WrongType { found: "int32", .. })
        ));
    }

    #[test]
    fn integer_accepts_every_width() {
        let document = doc! { "a": 3_i32, "b": 4_i64, "c": 5.0_f64, "d": 5.5_f64 };
        let reader = DocumentReader::new(&document);

        assert_eq!(reader.integer("a").unwrap(), 3);
        assert_eq!(reader.integer("b").unwrap(), 4);
        assert_eq!(reader.integer("c").unwrap(), 5);
        assert!(reader.integer("d").is_err());
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let document = doc! {};
        let reader = DocumentReader::new(&document);

        let err = reader.string("title").unwrap_err();
        assert_eq!(err.to_string(), "missing field `title`");
    }
}
