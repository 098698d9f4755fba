//! Schemadrift library surface.
//!
//! The engine lives in [`reconcile`]; the binary's command layer lives in
//! the private `cli` module of `main.rs`. Integration tests and embedders
//! drive the engine through this crate root.

pub mod reconcile;

pub use reconcile::{reconcile, ReconcileOptions, ReconcileOutcome};
