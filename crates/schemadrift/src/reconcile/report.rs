//! Report emitter: assembles and persists the comparison artifact.

use super::error::{ReconcileError, Result};
use super::types::{Comparison, ComparisonReport, DeclaredSchema, ObservedSchema};
use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::info;

/// Assemble the report from the two schema maps and their comparison.
pub fn build_report(
    declared: &DeclaredSchema,
    observed: &ObservedSchema,
    comparison: Comparison,
    offline_mode: bool,
) -> ComparisonReport {
    ComparisonReport {
        declared_schema: declared.to_kind_map(),
        observed_schema: observed.to_kind_map(),
        comparison,
        generated_at: Utc::now(),
        offline_mode,
    }
}

/// Write the report as pretty JSON to a file, or to stdout when no
/// destination is configured.
///
/// An unwritable destination is a configuration error: the run is complete
/// at this point and nothing downstream can recover the artifact.
pub fn emit_report(report: &ComparisonReport, destination: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match destination {
        Some(path) => {
            fs::write(path, &json).map_err(|e| {
                ReconcileError::Config(format!(
                    "cannot write report to {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!(path = %path.display(), bytes = json.len(), "Report written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::differ::build_comparison;
    use super::super::types::{DeclaredType, ObservedCollection};
    use schemadrift_protocol::CanonicalKind;
    use tempfile::TempDir;

    fn sample_report(offline: bool) -> ComparisonReport {
        let mut declared = DeclaredSchema::new();
        let mut user = DeclaredType::new("User");
        user.insert_field("name", "string", CanonicalKind::String);
        declared.insert(user);

        let mut observed = ObservedSchema::new();
        if !offline {
            let mut users = ObservedCollection::new("users");
            users.insert("name", CanonicalKind::String);
            observed.insert(users);
        }

        let comparison = build_comparison(&declared, &observed);
        build_report(&declared, &observed, comparison, offline)
    }

    #[test]
    fn test_report_shape() {
        let report = sample_report(false);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["declared_schema"]["User"]["name"], "string");
        assert_eq!(json["observed_schema"]["users"]["name"], "string");
        assert_eq!(json["comparison"]["summary"]["collections_matched"], 1);
        assert_eq!(json["offline_mode"], false);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_offline_report_keeps_declared_dump() {
        let report = sample_report(true);
        assert!(report.offline_mode);
        assert!(report.observed_schema.is_empty());
        assert_eq!(report.declared_schema.len(), 1);
        assert_eq!(report.comparison.summary.collections_total, 0);
    }

    #[test]
    fn test_emit_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        emit_report(&sample_report(false), Some(&path)).unwrap();

        let written: ComparisonReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.comparison.summary.fields_matched, 1);
    }

    #[test]
    fn test_emit_to_unwritable_destination() {
        let result = emit_report(
            &sample_report(false),
            Some(Path::new("/nonexistent/dir/report.json")),
        );
        assert!(matches!(result, Err(ReconcileError::Config(_))));
    }
}
