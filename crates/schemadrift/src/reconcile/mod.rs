//! Schema reconciliation engine.
//!
//! Reconciles two independently-maintained descriptions of the same data:
//! TypeScript type declarations extracted from source text, and the schema
//! actually observed in a live document store. The pipeline:
//!
//! 1. [`extractor`]: walk the declaration tree, brace-match declaration
//!    bodies, normalize each field's type expression
//! 2. [`inferrer`]: sample each store collection, classify values, expand
//!    nested maps into dotted paths
//! 3. [`matcher`]: link collection names to declared type names
//! 4. [`differ`]: per-field verdicts plus aggregate counters
//! 5. [`report`]: the persisted comparison artifact
//!
//! Extraction and inference are independent; a dead store degrades the run
//! to offline mode instead of failing it, and a missing declaration tree
//! degrades to an empty declared map. Only configuration problems abort.

pub mod differ;
pub mod error;
pub mod extractor;
pub mod inferrer;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod types;

pub use differ::{build_comparison, diff_collection};
pub use error::{ReconcileError, Result};
pub use extractor::{DeclarationExtractor, ExtractionResult, ExtractorConfig};
pub use inferrer::{InferConfig, InferenceResult, SchemaInferrer, DEFAULT_SAMPLE_LIMIT};
pub use matcher::match_collection;
pub use normalize::normalize_type_expr;
pub use report::{build_report, emit_report};
pub use types::{
    CollectionComparison, Comparison, ComparisonReport, ComparisonSummary, Confidence,
    DeclaredField, DeclaredSchema, DeclaredType, FieldVerdict, MatchLink, MatchStrategy,
    ObservedCollection, ObservedField, ObservedSchema, VerdictKind,
};

use schemadrift_store::StoreClient;
use std::path::Path;
use tracing::warn;

/// Options for one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub extractor: ExtractorConfig,
    pub inference: InferConfig,
}

/// Everything a run produced, for callers that need more than the report.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub report: ComparisonReport,
    /// Declared types found; zero means the comparison was meaningless
    pub declarations_found: usize,
    /// Source files skipped as unreadable
    pub files_skipped: usize,
    /// Collections whose sampling failed
    pub collections_failed: usize,
}

/// Run the full reconciliation.
///
/// `store` is `None` for a requested offline run; a store that turns out to
/// be unreachable degrades to offline the same way. Component failures are
/// absorbed here per the engine's recovery policy - this function only
/// produces, it never fails.
pub fn reconcile(
    types_root: &Path,
    store: Option<&dyn StoreClient>,
    options: &ReconcileOptions,
) -> ReconcileOutcome {
    let extraction =
        match DeclarationExtractor::with_config(types_root, options.extractor.clone()).extract() {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Declaration extraction failed, continuing with empty schema");
                ExtractionResult {
                    schema: DeclaredSchema::new(),
                    files_scanned: 0,
                    files_skipped: 0,
                }
            }
        };

    let inference = match store {
        Some(client) => SchemaInferrer::with_config(client, options.inference.clone()).infer(),
        None => InferenceResult {
            schema: ObservedSchema::new(),
            offline: true,
            collections_failed: 0,
        },
    };

    let comparison = build_comparison(&extraction.schema, &inference.schema);
    let report = build_report(
        &extraction.schema,
        &inference.schema,
        comparison,
        inference.offline,
    );

    ReconcileOutcome {
        declarations_found: extraction.schema.len(),
        files_skipped: extraction.files_skipped,
        collections_failed: inference.collections_failed,
        report,
    }
}
