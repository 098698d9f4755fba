//! Export-directory store backend.
//!
//! Reads a directory where each `<collection>.json` file holds that
//! collection's exported documents. Two dump shapes are accepted:
//!
//! - a top-level array of document objects (document ids taken from an `id`
//!   field when present, else the array index), or
//! - a top-level object keyed by document id.
//!
//! Admin-SDK dumps serialize store-native timestamps as
//! `{"_seconds": .., "_nanoseconds": ..}` objects; those convert to
//! [`StoreValue::Timestamp`]. Every other JSON object converts to a map.

use crate::client::StoreClient;
use crate::error::{Result, StoreError};
use chrono::DateTime;
use schemadrift_protocol::{Document, StoreValue};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A document store read from a directory of exported collection dumps.
pub struct ExportStore {
    root: PathBuf,
}

impl ExportStore {
    /// Open an export directory.
    ///
    /// Fails with `NotAvailable` if the path does not exist or is not a
    /// directory; callers treat that as the offline signal.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::NotAvailable(format!(
                "export directory does not exist: {}",
                root.display()
            )));
        }
        debug!(root = %root.display(), "Opened export store");
        Ok(Self { root })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }
}

impl StoreClient for ExportStore {
    fn list_collections(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn sample_documents(&self, collection: &str, limit: usize) -> Result<Vec<Document>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Err(StoreError::CollectionNotFound(collection.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        let parsed: Value = serde_json::from_str(&content)?;
        parse_documents(collection, &parsed, limit)
    }
}

fn parse_documents(collection: &str, parsed: &Value, limit: usize) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    match parsed {
        Value::Array(entries) => {
            for (index, entry) in entries.iter().take(limit).enumerate() {
                let fields = match entry {
                    Value::Object(map) => object_to_fields(map),
                    other => {
                        return Err(StoreError::Malformed {
                            collection: collection.to_string(),
                            message: format!(
                                "document at index {} is not an object (found {})",
                                index,
                                json_type_name(other)
                            ),
                        })
                    }
                };
                let id = entry
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| index.to_string());
                docs.push(Document::new(id, fields));
            }
        }
        Value::Object(by_id) => {
            for (id, entry) in by_id.iter().take(limit) {
                let fields = match entry {
                    Value::Object(map) => object_to_fields(map),
                    other => {
                        return Err(StoreError::Malformed {
                            collection: collection.to_string(),
                            message: format!(
                                "document '{}' is not an object (found {})",
                                id,
                                json_type_name(other)
                            ),
                        })
                    }
                };
                docs.push(Document::new(id.clone(), fields));
            }
        }
        other => {
            return Err(StoreError::Malformed {
                collection: collection.to_string(),
                message: format!(
                    "expected an array or object at top level, found {}",
                    json_type_name(other)
                ),
            })
        }
    }
    Ok(docs)
}

fn object_to_fields(map: &serde_json::Map<String, Value>) -> Vec<(String, StoreValue)> {
    map.iter()
        .map(|(name, value)| (name.clone(), json_to_store_value(value)))
        .collect()
}

/// Convert exported JSON into the closed store value representation.
pub fn json_to_store_value(value: &Value) -> StoreValue {
    match value {
        Value::Null => StoreValue::Null,
        Value::Bool(b) => StoreValue::Boolean(*b),
        Value::Number(n) => StoreValue::Number(n.as_f64().unwrap_or_default()),
        Value::String(s) => StoreValue::String(s.clone()),
        Value::Array(items) => StoreValue::List(items.iter().map(json_to_store_value).collect()),
        Value::Object(map) => match timestamp_from_object(map) {
            Some(ts) => StoreValue::Timestamp(ts),
            None => StoreValue::Map(object_to_fields(map)),
        },
    }
}

/// Detect the admin-SDK timestamp serialization: `{_seconds, _nanoseconds}`.
fn timestamp_from_object(
    map: &serde_json::Map<String, Value>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    if map.len() != 2 {
        return None;
    }
    let seconds = map.get("_seconds")?.as_i64()?;
    let nanos = map.get("_nanoseconds")?.as_i64()?;
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadrift_protocol::CanonicalKind;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_collection(dir: &Path, name: &str, content: &str) {
        let mut file = File::create(dir.join(format!("{}.json", name))).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_open_missing_directory() {
        let result = ExportStore::open("/nonexistent/export/dir");
        assert!(matches!(result, Err(StoreError::NotAvailable(_))));
    }

    #[test]
    fn test_list_collections_sorted() {
        let dir = TempDir::new().unwrap();
        write_collection(dir.path(), "users", "[]");
        write_collection(dir.path(), "articles", "[]");
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = ExportStore::open(dir.path()).unwrap();
        assert_eq!(store.list_collections().unwrap(), vec!["articles", "users"]);
    }

    #[test]
    fn test_sample_array_shape() {
        let dir = TempDir::new().unwrap();
        write_collection(
            dir.path(),
            "users",
            r#"[{"id": "u1", "name": "Ann", "age": 40}, {"name": "Bo"}]"#,
        );

        let store = ExportStore::open(dir.path()).unwrap();
        let docs = store.sample_documents("users", 5).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "u1");
        assert_eq!(docs[1].id, "1");
    }

    #[test]
    fn test_sample_object_shape_and_limit() {
        let dir = TempDir::new().unwrap();
        write_collection(
            dir.path(),
            "users",
            r#"{"a": {"name": "Ann"}, "b": {"name": "Bo"}, "c": {"name": "Cy"}}"#,
        );

        let store = ExportStore::open(dir.path()).unwrap();
        let docs = store.sample_documents("users", 2).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_sample_missing_collection() {
        let dir = TempDir::new().unwrap();
        let store = ExportStore::open(dir.path()).unwrap();
        let result = store.sample_documents("ghosts", 5);
        assert!(matches!(result, Err(StoreError::CollectionNotFound(_))));
    }

    #[test]
    fn test_malformed_top_level() {
        let dir = TempDir::new().unwrap();
        write_collection(dir.path(), "users", "42");
        let store = ExportStore::open(dir.path()).unwrap();
        let result = store.sample_documents("users", 5);
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_json_conversion_timestamp_sentinel() {
        let value: Value =
            serde_json::from_str(r#"{"_seconds": 1717243200, "_nanoseconds": 0}"#).unwrap();
        let converted = json_to_store_value(&value);
        assert_eq!(converted.kind(), CanonicalKind::Timestamp);
    }

    #[test]
    fn test_json_conversion_plain_object_stays_map() {
        // An object with extra keys is a map even if it carries _seconds
        let value: Value =
            serde_json::from_str(r#"{"_seconds": 1, "_nanoseconds": 2, "note": "x"}"#).unwrap();
        assert_eq!(json_to_store_value(&value).kind(), CanonicalKind::Map);
    }

    #[test]
    fn test_json_conversion_scalars() {
        assert_eq!(
            json_to_store_value(&Value::Bool(true)).kind(),
            CanonicalKind::Boolean
        );
        assert_eq!(json_to_store_value(&Value::Null).kind(), CanonicalKind::Null);
        let arr: Value = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(json_to_store_value(&arr).kind(), CanonicalKind::Array);
    }
}
