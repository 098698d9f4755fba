//! Document store access layer for Schemadrift.
//!
//! The reconciliation engine never talks to a store directly. It receives a
//! [`StoreClient`] handle whose lifecycle the caller owns: constructed once,
//! passed by reference, released at run end. There is no process-global
//! connection state.
//!
//! # Backends
//!
//! - [`ExportStore`]: reads a directory of exported collection dumps, one
//!   `<collection>.json` per collection, the shape produced by admin-SDK
//!   dump scripts. This is how an offline machine inspects a live store.
//! - [`MemoryStore`]: in-memory collections for tests, including a poison
//!   hook to simulate per-collection read failures.

pub mod client;
pub mod error;
pub mod export;
pub mod memory;

pub use client::StoreClient;
pub use error::{Result, StoreError};
pub use export::ExportStore;
pub use memory::MemoryStore;
