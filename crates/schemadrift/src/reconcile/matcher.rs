//! Name reconciler: links collection names to declared type names.
//!
//! Collections and declarations are named by different people at different
//! times; `articles` vs `Article` is the normal case, not the edge case.
//! An ordered cascade of strategies resolves the correspondence, first hit
//! wins, and a collection with no hit is a normal, expected outcome
//! (operational collections often have no declared type at all).

use super::types::{DeclaredSchema, MatchLink, MatchStrategy};

/// Match one collection name against the declared type names.
///
/// Cascade order: exact, case-insensitive, singular/plural, containment.
/// Candidates are scanned in sorted name order within each strategy, so
/// ties resolve deterministically.
pub fn match_collection(collection: &str, declared: &DeclaredSchema) -> Option<MatchLink> {
    let strategies: [(MatchStrategy, fn(&str, &str) -> bool); 4] = [
        (MatchStrategy::Exact, exact),
        (MatchStrategy::CaseInsensitive, case_insensitive),
        (MatchStrategy::Singularized, singularized),
        (MatchStrategy::Substring, substring),
    ];

    for (strategy, matches) in strategies {
        if let Some(name) = declared.names().find(|name| matches(collection, name)) {
            return Some(MatchLink {
                collection: collection.to_string(),
                declared_type: name.to_string(),
                strategy,
                confidence: strategy.confidence(),
            });
        }
    }
    None
}

fn exact(collection: &str, declared: &str) -> bool {
    collection == declared
}

fn case_insensitive(collection: &str, declared: &str) -> bool {
    collection.eq_ignore_ascii_case(declared)
}

/// Strip one trailing `s`/`S` from each side, then compare case-insensitively.
fn singularized(collection: &str, declared: &str) -> bool {
    strip_plural(collection).eq_ignore_ascii_case(strip_plural(declared))
}

fn strip_plural(name: &str) -> &str {
    name.strip_suffix(['s', 'S']).unwrap_or(name)
}

fn substring(collection: &str, declared: &str) -> bool {
    let a = collection.to_ascii_lowercase();
    let b = declared.to_ascii_lowercase();
    a.contains(&b) || b.contains(&a)
}
