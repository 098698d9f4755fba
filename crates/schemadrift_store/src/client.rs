//! The store client trait - the engine's only view of a document store.

use crate::error::Result;
use schemadrift_protocol::Document;

/// A handle to a schemaless document store.
///
/// The engine needs exactly three capabilities: list the collection names,
/// sample a bounded number of records from one collection, and read each
/// record's field mapping (carried on [`Document`]). Anything else a backend
/// can do is invisible to the engine.
pub trait StoreClient {
    /// List the names of all collections in the store.
    fn list_collections(&self) -> Result<Vec<String>>;

    /// Sample up to `limit` documents from a collection.
    ///
    /// Backends return whatever subset is cheapest to produce; callers must
    /// not assume any particular ordering across the whole collection.
    fn sample_documents(&self, collection: &str, limit: usize) -> Result<Vec<Document>>;
}
