//! Error types for the reconciliation engine.
//!
//! Only configuration-level failures are terminal. Everything else - an
//! unreadable source file, a failed collection sample - is recovered inside
//! its component and surfaced through counters and log lines, because a
//! partial comparison is still a useful comparison.

use schemadrift_store::StoreError;
use std::io;
use thiserror::Error;

/// Reconciliation error type
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Declaration root not found: {0}")]
    RootNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReconcileError>;
