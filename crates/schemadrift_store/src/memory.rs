//! In-memory store backend for tests.

use crate::client::StoreClient;
use crate::error::{Result, StoreError};
use schemadrift_protocol::Document;
use std::collections::HashSet;

/// An in-memory document store.
///
/// Collections keep insertion order. `poison` marks a collection so that
/// sampling it fails, for exercising per-collection failure recovery.
#[derive(Default)]
pub struct MemoryStore {
    collections: Vec<(String, Vec<Document>)>,
    poisoned: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection with its documents.
    pub fn with_collection(mut self, name: impl Into<String>, docs: Vec<Document>) -> Self {
        self.collections.push((name.into(), docs));
        self
    }

    /// Mark a collection so sampling it returns an error.
    pub fn poison(mut self, name: impl Into<String>) -> Self {
        self.poisoned.insert(name.into());
        self
    }
}

impl StoreClient for MemoryStore {
    fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self
            .collections
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn sample_documents(&self, collection: &str, limit: usize) -> Result<Vec<Document>> {
        if self.poisoned.contains(collection) {
            return Err(StoreError::NotAvailable(format!(
                "collection '{}' is unreadable",
                collection
            )));
        }
        let (_, docs) = self
            .collections
            .iter()
            .find(|(name, _)| name == collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;
        Ok(docs.iter().take(limit).cloned().collect())
    }
}
