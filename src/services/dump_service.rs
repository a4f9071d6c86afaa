//! Whole-database export to, and import from, a JSON file.
//!
//! The file is one object mapping collection names to arrays of documents.
//! Object ids are written as their 24-character hex form; on import every
//! string field of a document that looks like one is turned back into an
//! object id. Strings held directly in arrays are left untouched.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use mongodb::bson::{Bson, DateTime, Document};
use serde::Serialize;
use serde_json::{Map, Number, Value, ser::PrettyFormatter};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::info;

use crate::dao::{
    catalog_store::mongodb::{MongoCatalogStore, MongoDaoError},
    object_id::parse_id,
};

/// Default dump location, relative to the working directory.
pub const DEFAULT_DUMP_FILE: &str = "mongo_data.json";

/// Collection name to documents, kept in file order.
pub type DumpFile = IndexMap<String, Vec<Value>>;

/// Failures of export and import.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The dump file could not be opened, created or written.
    #[error("failed to access dump file `{}`", .path.display())]
    Io {
        /// Dump file path.
        path: PathBuf,
        /// Filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The dump file is not a JSON object of arrays.
    #[error("dump file `{}` is not valid JSON", .path.display())]
    Json {
        /// Dump file path.
        path: PathBuf,
        /// Parser or serializer error.
        #[source]
        source: serde_json::Error,
    },
    /// An array entry is not an object.
    #[error("entry {index} of collection `{collection}` is not a JSON object")]
    NotADocument {
        /// Collection the entry belongs to.
        collection: String,
        /// Position of the entry in its array.
        index: usize,
    },
    /// The database operation failed.
    #[error(transparent)]
    Store(#[from] MongoDaoError),
}

/// Counts reported after an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Collections present in the dump file.
    pub collections: usize,
    /// Documents deleted before loading.
    pub removed: u64,
    /// Documents inserted from the file.
    pub inserted: usize,
}

/// Read every collection of the database into a dump.
pub async fn export_database(store: &MongoCatalogStore) -> Result<DumpFile, DumpError> {
    let mut names = store.collection_names().await?;
    names.sort();

    let mut dump = DumpFile::with_capacity(names.len());
    for name in names {
        let documents = store.dump_collection(&name).await?;
        info!(collection = %name, count = documents.len(), "exported collection");
        dump.insert(name, documents.into_iter().map(document_to_json).collect());
    }

    Ok(dump)
}

/// Replace the whole database content with `dump`.
///
/// The dump is converted before anything is deleted, so a malformed file
/// leaves the database untouched.
pub async fn import_database(
    store: &MongoCatalogStore,
    dump: DumpFile,
) -> Result<ImportSummary, DumpError> {
    let collections = dump_to_documents(dump)?;
    let mut summary = ImportSummary {
        collections: collections.len(),
        ..ImportSummary::default()
    };

    for name in store.collection_names().await? {
        let removed = store.clear_collection(&name).await?;
        info!(collection = %name, removed, "cleared collection");
        summary.removed += removed;
    }

    for (name, documents) in collections {
        let inserted = store.insert_documents(&name, documents).await?;
        info!(collection = %name, inserted, "imported collection");
        summary.inserted += inserted;
    }

    Ok(summary)
}

/// Parse a dump file.
pub fn read_dump_file(path: &Path) -> Result<DumpFile, DumpError> {
    let file = File::open(path).map_err(|source| DumpError::Io {
        path: path.to_owned(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| DumpError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Write `dump` as JSON indented by four spaces.
pub fn write_dump_file(path: &Path, dump: &DumpFile) -> Result<(), DumpError> {
    let io_error = |source| DumpError::Io {
        path: path.to_owned(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    dump.serialize(&mut serializer)
        .map_err(|source| DumpError::Json {
            path: path.to_owned(),
            source,
        })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Convert every entry of `dump` into a document, keeping collection order.
pub fn dump_to_documents(dump: DumpFile) -> Result<Vec<(String, Vec<Document>)>, DumpError> {
    dump.into_iter()
        .map(|(collection, entries)| {
            let documents = entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| match entry {
                    Value::Object(fields) => Ok(object_to_document(fields)),
                    _ => Err(DumpError::NotADocument {
                        collection: collection.clone(),
                        index,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((collection, documents))
        })
        .collect()
}

/// JSON form of a stored document, ids as hex strings.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::String(text) => Value::String(text),
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Int32(number) => Value::from(number),
        Bson::Int64(number) => Value::from(number),
        Bson::Double(number) => Number::from_f64(number).map_or(Value::Null, Value::Number),
        Bson::DateTime(date) => Value::String(format_date(date)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => document_to_json(document),
        other => Value::String(other.to_string()),
    }
}

fn format_date(date: DateTime) -> String {
    let nanos = i128::from(date.timestamp_millis()) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|date| date.format(&Rfc3339).ok())
        .unwrap_or_else(|| date.to_string())
}

fn object_to_document(fields: Map<String, Value>) -> Document {
    fields
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => match parse_id(&text) {
                    Ok(id) => Bson::ObjectId(id),
                    Err(_) => Bson::String(text),
                },
                other => json_to_bson(other),
            };
            (key, value)
        })
        .collect()
}

fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(flag) => Bson::Boolean(flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => i32::try_from(int).map_or(Bson::Int64(int), Bson::Int32),
            None => number.as_f64().map_or(Bson::Null, Bson::Double),
        },
        Value::String(text) => Bson::String(text),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(fields) => Bson::Document(object_to_document(fields)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    const TIP: &str = "64c3cdfbd54e7b39dc4b1d74";

    #[test]
    fn export_writes_object_ids_as_hex() {
        let id = ObjectId::parse_str(TIP).unwrap();
        let value = document_to_json(doc! {
            "_id": id,
            "likes": 3,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "nested": { "ref": id },
        });

        assert_eq!(
            value,
            json!({
                "_id": TIP,
                "likes": 3,
                "ratio": 0.5,
                "tags": ["a", "b"],
                "nested": { "ref": TIP },
            })
        );
    }

    #[test]
    fn export_formats_dates_as_rfc3339() {
        let value = bson_to_json(Bson::DateTime(DateTime::from_millis(0)));
        assert_eq!(value, json!("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn import_restores_object_ids_in_document_fields_only() {
        let mut dump = DumpFile::new();
        dump.insert(
            "tips".into(),
            vec![json!({
                "_id": TIP,
                "title": "Aim for the head",
                "upper": "64C3CDFBD54E7B39DC4B1D74",
                "refs": [TIP, { "inner": TIP }],
                "likes": 4,
                "big": 5_000_000_000_i64,
            })],
        );

        let mut collections = dump_to_documents(dump).unwrap();
        let (name, documents) = collections.remove(0);
        let id = ObjectId::parse_str(TIP).unwrap();

        assert_eq!(name, "tips");
        assert_eq!(
            documents,
            vec![doc! {
                "_id": id,
                "title": "Aim for the head",
                "upper": "64C3CDFBD54E7B39DC4B1D74",
                "refs": [TIP, { "inner": id }],
                "likes": 4_i32,
                "big": 5_000_000_000_i64,
            }]
        );
    }

    #[test]
    fn import_rejects_non_object_entries() {
        let mut dump = DumpFile::new();
        dump.insert("games".into(), vec![json!({}), json!("oops")]);

        let err = dump_to_documents(dump).unwrap_err();
        assert!(matches!(
            err,
            DumpError::NotADocument { ref collection, index: 1 } if collection == "games"
        ));
    }

    #[test]
    fn dump_file_round_trips_with_four_space_indent() {
        let path = std::env::temp_dir().join(format!("tips-dump-{}.json", std::process::id()));
        let mut dump = DumpFile::new();
        dump.insert("reports".into(), vec![json!({ "reason": "Typo" })]);
        dump.insert("games".into(), Vec::new());

        write_dump_file(&path, &dump).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let read_back = read_dump_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(text.contains("\n    \"reports\": ["));
        assert_eq!(read_back, dump);
        assert_eq!(read_back.keys().collect::<Vec<_>>(), ["reports", "games"]);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = read_dump_file(Path::new("/nonexistent/mongo_data.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mongo_data.json"));
    }
}
