//! Check command - the full reconciliation run.
//!
//! Extracts declarations, infers the observed store schema (online mode),
//! links and diffs them, and emits the report. Drift findings are product,
//! not failure: the only non-zero exit from a completed run is a scan that
//! found no declarations at all, because the comparison is meaningless
//! without them.

use crate::cli::error::HelpfulError;
use crate::cli::output::{format_ratio, print_table};
use crate::cli::CommandStatus;
use schemadrift::reconcile::{
    self, CollectionComparison, ComparisonReport, ExtractorConfig, InferConfig, ReconcileOptions,
    VerdictKind,
};
use schemadrift_store::{ExportStore, StoreClient};
use std::path::PathBuf;
use tracing::warn;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    /// Root of the declaration source tree
    pub types: PathBuf,
    /// Store export directory; None runs offline
    pub store: Option<PathBuf>,
    /// Documents sampled per collection
    pub samples: usize,
    /// Report destination; None prints to stdout on --json
    pub output: Option<PathBuf>,
    /// Print the JSON report to stdout instead of the console rendering
    pub json: bool,
    /// Suppress the console rendering
    pub quiet: bool,
}

/// Execute the check command
pub fn run(args: CheckArgs) -> anyhow::Result<CommandStatus> {
    if args.samples == 0 {
        return Err(HelpfulError::invalid_sample_bound(args.samples).into());
    }
    if args.types.exists() && !args.types.is_dir() {
        return Err(HelpfulError::not_a_directory(&args.types).into());
    }

    // A store that cannot be opened degrades the run to offline mode;
    // declarations alone are still worth reporting on.
    let store = match &args.store {
        Some(path) => match ExportStore::open(path) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Store unavailable, running offline");
                None
            }
        },
        None => None,
    };

    let options = ReconcileOptions {
        extractor: ExtractorConfig::default(),
        inference: InferConfig {
            sample_limit: args.samples,
        },
    };
    let outcome = reconcile::reconcile(
        &args.types,
        store.as_ref().map(|s| s as &dyn StoreClient),
        &options,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else if !args.quiet {
        render_console(&outcome.report);
    }
    if args.output.is_some() {
        reconcile::emit_report(&outcome.report, args.output.as_deref())?;
    }

    if outcome.declarations_found == 0 {
        eprintln!(
            "WARNING: no exported type declarations found under {}",
            args.types.display()
        );
        return Ok(CommandStatus::NoDeclarations);
    }
    Ok(CommandStatus::Success)
}

/// Human-readable comparison, one section per collection.
fn render_console(report: &ComparisonReport) {
    if report.offline_mode {
        println!("Schema comparison (offline - declarations only)");
    } else {
        println!("Schema comparison");
    }
    println!();

    println!("Declared types: {}", report.declared_schema.len());
    for (name, fields) in &report.declared_schema {
        println!("  {} ({} fields)", name, fields.len());
    }
    println!();

    for comparison in &report.comparison.per_collection {
        render_collection(comparison);
        println!();
    }

    let summary = &report.comparison.summary;
    print_table(
        &["Collections", "Fields matched", "Mismatches", "Missing"],
        vec![vec![
            format_ratio(summary.collections_matched, summary.collections_total),
            format_ratio(summary.fields_matched, summary.fields_total),
            summary.type_mismatches.to_string(),
            summary.missing_fields.to_string(),
        ]],
    );
}

fn render_collection(comparison: &CollectionComparison) {
    match (&comparison.matched_type, &comparison.strategy) {
        (Some(matched), Some(strategy)) => {
            println!(
                "Collection: {} -> {} ({})",
                comparison.collection, matched, strategy
            );
        }
        _ => {
            println!(
                "Collection: {} - no matching declared type",
                comparison.collection
            );
            return;
        }
    }

    for verdict in &comparison.verdicts {
        match verdict.verdict {
            VerdictKind::Matched => {
                // observed_kind is always present on a matched verdict
                let kind = verdict
                    .observed_kind
                    .map(|k| k.to_string())
                    .unwrap_or_default();
                println!("  matched      {}: {}", verdict.field, kind);
            }
            VerdictKind::TypeMismatch => {
                println!(
                    "  MISMATCH     {}: declared {}, observed {}",
                    verdict.field,
                    verdict
                        .declared_kind
                        .map(|k| k.to_string())
                        .unwrap_or_default(),
                    verdict
                        .observed_kind
                        .map(|k| k.to_string())
                        .unwrap_or_default(),
                );
            }
            VerdictKind::UnexpectedField => {
                println!(
                    "  unexpected   {}: {}",
                    verdict.field,
                    verdict
                        .observed_kind
                        .map(|k| k.to_string())
                        .unwrap_or_default(),
                );
            }
            VerdictKind::MissingField => {
                println!(
                    "  MISSING      {}: declared {}",
                    verdict.field,
                    verdict
                        .declared_kind
                        .map(|k| k.to_string())
                        .unwrap_or_default(),
                );
            }
        }
    }
}
