//! Differ: per-field verdicts and aggregate counters.
//!
//! Observed field paths are compared against the matched declaration by
//! their top-level name. A nested path under a declared map counts as
//! covered: the declaration promised a map, not its interior shape.
//! Missing-field verdicts are computed once per declared field after the
//! observed sweep, never once per sample.

use super::matcher::match_collection;
use super::types::{
    CollectionComparison, Comparison, ComparisonSummary, DeclaredSchema, DeclaredType,
    FieldVerdict, ObservedCollection, ObservedSchema, VerdictKind,
};
use schemadrift_protocol::CanonicalKind;
use std::collections::BTreeSet;

/// Diff one observed collection against its matched declaration.
pub fn diff_collection(
    observed: &ObservedCollection,
    declared: &DeclaredType,
) -> Vec<FieldVerdict> {
    let mut verdicts = Vec::new();
    let mut observed_top_level = BTreeSet::new();

    for field in observed.fields() {
        let top_level = top_level_name(&field.path);
        observed_top_level.insert(top_level.to_string());

        let verdict = match declared.field(top_level) {
            None => FieldVerdict::unexpected(&field.path, field.kind),
            Some(decl) if decl.kind == field.kind => {
                FieldVerdict::matched(&field.path, field.kind)
            }
            Some(decl) if decl.kind == CanonicalKind::Map && field.path.contains('.') => {
                // Nested fields under a declared map are covered by the
                // map's declaration, not separate mismatches.
                FieldVerdict::matched_under_map(&field.path, field.kind)
            }
            Some(decl) => FieldVerdict::type_mismatch(&field.path, decl.kind, field.kind),
        };
        verdicts.push(verdict);
    }

    for field in &declared.fields {
        if !observed_top_level.contains(&field.name) {
            verdicts.push(FieldVerdict::missing(&field.name, field.kind));
        }
    }

    verdicts
}

/// Build the full comparison: match every collection, diff the matched
/// pairs, and sum the counters.
pub fn build_comparison(declared: &DeclaredSchema, observed: &ObservedSchema) -> Comparison {
    let mut per_collection = Vec::new();
    let mut summary = ComparisonSummary::default();

    for collection in observed.iter() {
        summary.collections_total += 1;

        let link = match_collection(&collection.name, declared);
        let verdicts = match link
            .as_ref()
            .and_then(|l| declared.get(&l.declared_type))
        {
            Some(declared_type) => {
                summary.collections_matched += 1;
                diff_collection(collection, declared_type)
            }
            None => Vec::new(),
        };

        for verdict in &verdicts {
            match verdict.verdict {
                VerdictKind::Matched => {
                    summary.fields_total += 1;
                    summary.fields_matched += 1;
                }
                VerdictKind::TypeMismatch => {
                    summary.fields_total += 1;
                    summary.type_mismatches += 1;
                }
                VerdictKind::UnexpectedField => {
                    summary.fields_total += 1;
                }
                VerdictKind::MissingField => {
                    summary.missing_fields += 1;
                }
            }
        }

        per_collection.push(CollectionComparison {
            collection: collection.name.clone(),
            matched_type: link.as_ref().map(|l| l.declared_type.clone()),
            strategy: link.as_ref().map(|l| l.strategy),
            confidence: link.as_ref().map(|l| l.confidence),
            verdicts,
        });
    }

    Comparison {
        per_collection,
        summary,
    }
}

fn top_level_name(path: &str) -> &str {
    path.split('.').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(fields: &[(&str, &str, CanonicalKind)]) -> DeclaredType {
        let mut declared = DeclaredType::new("T");
        for (name, raw, kind) in fields {
            declared.insert_field(*name, *raw, *kind);
        }
        declared
    }

    fn observed(name: &str, fields: &[(&str, CanonicalKind)]) -> ObservedCollection {
        let mut collection = ObservedCollection::new(name);
        for (path, kind) in fields {
            collection.insert(*path, *kind);
        }
        collection
    }

    #[test]
    fn test_matched_and_mismatched() {
        let decl = declared(&[
            ("title", "string", CanonicalKind::String),
            ("views", "number", CanonicalKind::Number),
        ]);
        let obs = observed(
            "articles",
            &[
                ("title", CanonicalKind::String),
                ("views", CanonicalKind::String),
            ],
        );

        let verdicts = diff_collection(&obs, &decl);
        assert_eq!(verdicts[0].verdict, VerdictKind::Matched);
        assert_eq!(verdicts[1].verdict, VerdictKind::TypeMismatch);
        assert_eq!(verdicts[1].declared_kind, Some(CanonicalKind::Number));
        assert_eq!(verdicts[1].observed_kind, Some(CanonicalKind::String));
    }

    #[test]
    fn test_nested_path_under_declared_map_is_matched() {
        let decl = declared(&[("settings", "Record<string, string>", CanonicalKind::Map)]);
        let obs = observed(
            "users",
            &[
                ("settings", CanonicalKind::Map),
                ("settings.theme", CanonicalKind::String),
            ],
        );

        let verdicts = diff_collection(&obs, &decl);
        assert!(verdicts
            .iter()
            .all(|v| v.verdict == VerdictKind::Matched));
        let nested = verdicts.iter().find(|v| v.field == "settings.theme").unwrap();
        assert_eq!(nested.declared_kind, Some(CanonicalKind::Map));
        assert_eq!(nested.observed_kind, Some(CanonicalKind::String));
    }

    #[test]
    fn test_nested_path_under_non_map_is_mismatch() {
        let decl = declared(&[("settings", "string", CanonicalKind::String)]);
        let obs = observed("users", &[("settings.theme", CanonicalKind::String)]);

        let verdicts = diff_collection(&obs, &decl);
        assert_eq!(verdicts[0].verdict, VerdictKind::TypeMismatch);
    }

    #[test]
    fn test_missing_field_reported_once() {
        let decl = declared(&[("views", "number", CanonicalKind::Number)]);
        // Several observed paths, none of them `views`
        let obs = observed(
            "articles",
            &[
                ("meta", CanonicalKind::Map),
                ("meta.a", CanonicalKind::String),
                ("meta.b", CanonicalKind::String),
            ],
        );

        let verdicts = diff_collection(&obs, &decl);
        let missing: Vec<_> = verdicts
            .iter()
            .filter(|v| v.verdict == VerdictKind::MissingField)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].field, "views");
    }

    #[test]
    fn test_nested_observation_counts_as_presence() {
        // `settings.theme` observed without a bare `settings` path still
        // means `settings` is present
        let decl = declared(&[("settings", "Record<string, string>", CanonicalKind::Map)]);
        let obs = observed("users", &[("settings.theme", CanonicalKind::String)]);

        let verdicts = diff_collection(&obs, &decl);
        assert!(verdicts
            .iter()
            .all(|v| v.verdict != VerdictKind::MissingField));
    }

    #[test]
    fn test_article_scenario_end_to_end() {
        let mut declared_schema = DeclaredSchema::new();
        let mut article = DeclaredType::new("Article");
        article.insert_field("title", "string", CanonicalKind::String);
        article.insert_field("tags", "string[]", CanonicalKind::Array);
        article.insert_field("views", "number", CanonicalKind::Number);
        declared_schema.insert(article);

        let mut observed_schema = ObservedSchema::new();
        observed_schema.insert(observed(
            "articles",
            &[
                ("title", CanonicalKind::String),
                ("tags", CanonicalKind::Array),
                ("published", CanonicalKind::Boolean),
            ],
        ));

        let comparison = build_comparison(&declared_schema, &observed_schema);
        assert_eq!(comparison.per_collection.len(), 1);
        let articles = &comparison.per_collection[0];
        assert_eq!(articles.matched_type.as_deref(), Some("Article"));

        let verdict_of = |field: &str| {
            articles
                .verdicts
                .iter()
                .find(|v| v.field == field)
                .unwrap()
                .verdict
        };
        assert_eq!(verdict_of("title"), VerdictKind::Matched);
        assert_eq!(verdict_of("tags"), VerdictKind::Matched);
        assert_eq!(verdict_of("published"), VerdictKind::UnexpectedField);
        assert_eq!(verdict_of("views"), VerdictKind::MissingField);

        let summary = comparison.summary;
        assert_eq!(summary.collections_total, 1);
        assert_eq!(summary.collections_matched, 1);
        assert_eq!(summary.fields_total, 3);
        assert_eq!(summary.fields_matched, 2);
        assert_eq!(summary.type_mismatches, 0);
        assert_eq!(summary.missing_fields, 1);
    }

    #[test]
    fn test_unmatched_collection_counts_without_verdicts() {
        let declared_schema = DeclaredSchema::new();
        let mut observed_schema = ObservedSchema::new();
        observed_schema.insert(observed("audit_log", &[("x", CanonicalKind::String)]));

        let comparison = build_comparison(&declared_schema, &observed_schema);
        assert_eq!(comparison.summary.collections_total, 1);
        assert_eq!(comparison.summary.collections_matched, 0);
        assert!(comparison.per_collection[0].verdicts.is_empty());
        assert!(comparison.per_collection[0].matched_type.is_none());
    }
}
