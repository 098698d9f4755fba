//! Error types for store backends.

use std::io;
use thiserror::Error;

/// Store access error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store not available: {0}")]
    NotAvailable(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Malformed export for collection '{collection}': {message}")]
    Malformed { collection: String, message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
