//! Live schema inferrer: the observed side of the comparison.
//!
//! Samples a bounded number of documents per collection through a
//! [`StoreClient`] handle and classifies every field by value introspection.
//! Map-valued fields are recorded at their own path AND expanded, each
//! nested field landing at `parent.child`. Merging across documents and
//! across the recursion is last-write-wins per exact path.
//!
//! Failure policy mirrors the extractor: the store being unreachable yields
//! an empty schema plus an offline signal (comparison proceeds with whatever
//! declarations exist); one collection failing to sample keeps its partial
//! result and never aborts the others.

use super::types::{ObservedCollection, ObservedSchema};
use schemadrift_protocol::StoreValue;
use schemadrift_store::StoreClient;
use tracing::{info, warn};

/// Default number of documents sampled per collection.
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

/// Configuration for schema inference.
#[derive(Debug, Clone)]
pub struct InferConfig {
    /// Upper bound on documents sampled per collection (cost control)
    pub sample_limit: usize,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

/// Result of one inference run.
#[derive(Debug)]
pub struct InferenceResult {
    pub schema: ObservedSchema,
    /// True when the store could not even list collections
    pub offline: bool,
    /// Collections whose sampling failed (partial results kept)
    pub collections_failed: usize,
}

/// Infers the observed schema of a document store.
///
/// Holds a borrowed client handle; the caller owns the connection lifecycle.
pub struct SchemaInferrer<'a> {
    client: &'a dyn StoreClient,
    config: InferConfig,
}

impl<'a> SchemaInferrer<'a> {
    pub fn new(client: &'a dyn StoreClient) -> Self {
        Self {
            client,
            config: InferConfig::default(),
        }
    }

    pub fn with_config(client: &'a dyn StoreClient, config: InferConfig) -> Self {
        Self { client, config }
    }

    /// Run inference. Soft-fails: store trouble degrades the result, it
    /// never propagates to the caller.
    pub fn infer(&self) -> InferenceResult {
        let collections = match self.client.list_collections() {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "Store unavailable, proceeding offline");
                return InferenceResult {
                    schema: ObservedSchema::new(),
                    offline: true,
                    collections_failed: 0,
                };
            }
        };

        let mut schema = ObservedSchema::new();
        let mut collections_failed = 0;

        for name in collections {
            let mut collection = ObservedCollection::new(name.as_str());
            match self.client.sample_documents(&name, self.config.sample_limit) {
                Ok(documents) => {
                    for document in &documents {
                        for (field, value) in &document.fields {
                            record_value(&mut collection, field, value);
                        }
                    }
                }
                Err(e) => {
                    warn!(collection = %name, error = %e, "Sampling failed, keeping partial result");
                    collections_failed += 1;
                }
            }
            schema.insert(collection);
        }

        info!(
            collections = schema.len(),
            failed = collections_failed,
            sample_limit = self.config.sample_limit,
            "Live schema inference complete"
        );

        InferenceResult {
            schema,
            offline: false,
            collections_failed,
        }
    }
}

/// Record one value at its path, expanding nested maps recursively.
fn record_value(collection: &mut ObservedCollection, path: &str, value: &StoreValue) {
    collection.insert(path, value.kind());
    if let Some(nested) = value.as_map() {
        for (name, nested_value) in nested {
            let nested_path = format!("{}.{}", path, name);
            record_value(collection, &nested_path, nested_value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadrift_protocol::{CanonicalKind, Document};
    use schemadrift_store::{MemoryStore, Result as StoreResult, StoreError};

    struct OfflineStore;

    impl StoreClient for OfflineStore {
        fn list_collections(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::NotAvailable("no connection".to_string()))
        }

        fn sample_documents(&self, _: &str, _: usize) -> StoreResult<Vec<Document>> {
            Err(StoreError::NotAvailable("no connection".to_string()))
        }
    }

    fn fields(pairs: Vec<(&str, StoreValue)>) -> Vec<(String, StoreValue)> {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_offline_store_yields_empty_schema() {
        let inferrer = SchemaInferrer::new(&OfflineStore);
        let result = inferrer.infer();
        assert!(result.offline);
        assert!(result.schema.is_empty());
    }

    #[test]
    fn test_scalar_classification() {
        let store = MemoryStore::new().with_collection(
            "users",
            vec![Document::new(
                "u1",
                fields(vec![
                    ("name", StoreValue::String("Ann".into())),
                    ("age", StoreValue::Number(41.0)),
                    ("active", StoreValue::Boolean(true)),
                    ("notes", StoreValue::Null),
                    ("tags", StoreValue::List(vec![])),
                ]),
            )],
        );

        let result = SchemaInferrer::new(&store).infer();
        let users = result.schema.get("users").unwrap();
        assert_eq!(users.kind_of("name"), Some(CanonicalKind::String));
        assert_eq!(users.kind_of("age"), Some(CanonicalKind::Number));
        assert_eq!(users.kind_of("active"), Some(CanonicalKind::Boolean));
        assert_eq!(users.kind_of("notes"), Some(CanonicalKind::Null));
        assert_eq!(users.kind_of("tags"), Some(CanonicalKind::Array));
        assert!(!result.offline);
    }

    #[test]
    fn test_nested_map_expansion() {
        let store = MemoryStore::new().with_collection(
            "users",
            vec![Document::new(
                "u1",
                fields(vec![(
                    "settings",
                    StoreValue::Map(vec![
                        ("theme".to_string(), StoreValue::String("dark".into())),
                        (
                            "limits".to_string(),
                            StoreValue::Map(vec![(
                                "max".to_string(),
                                StoreValue::Number(10.0),
                            )]),
                        ),
                    ]),
                )]),
            )],
        );

        let result = SchemaInferrer::new(&store).infer();
        let users = result.schema.get("users").unwrap();
        // The map itself and every nested path are all recorded
        assert_eq!(users.kind_of("settings"), Some(CanonicalKind::Map));
        assert_eq!(users.kind_of("settings.theme"), Some(CanonicalKind::String));
        assert_eq!(users.kind_of("settings.limits"), Some(CanonicalKind::Map));
        assert_eq!(
            users.kind_of("settings.limits.max"),
            Some(CanonicalKind::Number)
        );
    }

    #[test]
    fn test_later_sample_overwrites_kind() {
        let store = MemoryStore::new().with_collection(
            "articles",
            vec![
                Document::new("a1", fields(vec![("views", StoreValue::Number(3.0))])),
                Document::new(
                    "a2",
                    fields(vec![("views", StoreValue::String("many".into()))]),
                ),
            ],
        );

        let result = SchemaInferrer::new(&store).infer();
        let articles = result.schema.get("articles").unwrap();
        assert_eq!(articles.kind_of("views"), Some(CanonicalKind::String));
        assert_eq!(articles.fields().len(), 1);
    }

    #[test]
    fn test_sample_limit_is_applied() {
        let docs: Vec<Document> = (0..10)
            .map(|i| {
                Document::new(
                    format!("d{}", i),
                    fields(vec![(
                        if i < 8 { "early" } else { "late" },
                        StoreValue::Number(i as f64),
                    )]),
                )
            })
            .collect();
        let store = MemoryStore::new().with_collection("events", docs);

        let config = InferConfig { sample_limit: 3 };
        let result = SchemaInferrer::with_config(&store, config).infer();
        let events = result.schema.get("events").unwrap();
        // Only the first three documents were sampled
        assert_eq!(events.kind_of("early"), Some(CanonicalKind::Number));
        assert_eq!(events.kind_of("late"), None);
    }

    #[test]
    fn test_failed_collection_keeps_others() {
        let store = MemoryStore::new()
            .with_collection(
                "good",
                vec![Document::new(
                    "g1",
                    fields(vec![("x", StoreValue::Number(1.0))]),
                )],
            )
            .with_collection("bad", vec![])
            .poison("bad");

        let result = SchemaInferrer::new(&store).infer();
        assert!(!result.offline);
        assert_eq!(result.collections_failed, 1);
        // The failed collection keeps its (empty) entry
        assert!(result.schema.get("bad").unwrap().is_empty());
        assert_eq!(
            result.schema.get("good").unwrap().kind_of("x"),
            Some(CanonicalKind::Number)
        );
    }
}
