//! Canonical types for Schemadrift.
//!
//! # Philosophy: One Kind Per Value
//!
//! Both schema descriptions Schemadrift compares - type declarations parsed
//! from source text and values sampled from a live document store - are
//! normalized into the same closed set of coarse kinds before any comparison
//! happens. This crate is the single source of truth for that set.
//!
//! - [`CanonicalKind`]: the closed kind enumeration. Every raw type
//!   expression and every runtime value maps to exactly one kind; `Unknown`
//!   is the explicit fallback, never a silent omission.
//! - [`StoreValue`]: the closed tagged representation of a runtime value at
//!   the store-client boundary, so kind inference is an exhaustive match
//!   instead of open-ended type inspection.
//! - [`Document`]: one sampled record - an id plus its ordered field mapping.
//!
//! Downstream crates (the store backends, the reconciliation engine) depend
//! on this crate and never define their own kind vocabulary.

pub mod types;

pub use types::{CanonicalKind, Document, StoreValue};
