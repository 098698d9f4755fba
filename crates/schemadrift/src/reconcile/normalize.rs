//! Type normalizer: raw type expressions to canonical kinds.
//!
//! Classification is pattern-based and order-sensitive: structural markers
//! (arrays, composites) are tested before vocabulary, and vocabulary before
//! primitives, so `Array<Date>` is an array and `Record<string, number>` is
//! a map. Primitive keywords match as whole words, case-insensitively, so
//! `number | null` is a number but `PhoneNumber` is not.
//!
//! Total function: anything unrecognized is `Unknown`, which is itself a
//! reported outcome, never an error.

use schemadrift_protocol::CanonicalKind;

/// Keyword sets per kind. Whole-word, case-insensitive.
const TIMESTAMP_WORDS: &[&str] = &["date", "timestamp", "datetime"];
const REFERENCE_WORDS: &[&str] = &["documentreference", "reference"];
const STRING_WORDS: &[&str] = &["string"];
const NUMBER_WORDS: &[&str] = &["number", "bigint"];
const BOOLEAN_WORDS: &[&str] = &["boolean"];
const NULL_WORDS: &[&str] = &["null", "undefined"];

/// Map a raw type expression to its canonical kind.
pub fn normalize_type_expr(raw: &str) -> CanonicalKind {
    let expr = raw.trim();

    // Structural markers first: they dominate whatever vocabulary appears
    // inside the brackets.
    if expr.contains("[]") || contains_word(expr, "array") || contains_word(expr, "readonlyarray")
    {
        return CanonicalKind::Array;
    }
    if expr.contains('{')
        || contains_word(expr, "record")
        || contains_word(expr, "map")
        || contains_word(expr, "object")
    {
        return CanonicalKind::Map;
    }

    if matches_any(expr, TIMESTAMP_WORDS) {
        return CanonicalKind::Timestamp;
    }
    if matches_any(expr, REFERENCE_WORDS) {
        return CanonicalKind::Reference;
    }
    if matches_any(expr, STRING_WORDS) {
        return CanonicalKind::String;
    }
    if matches_any(expr, NUMBER_WORDS) {
        return CanonicalKind::Number;
    }
    if matches_any(expr, BOOLEAN_WORDS) {
        return CanonicalKind::Boolean;
    }
    if matches_any(expr, NULL_WORDS) {
        return CanonicalKind::Null;
    }

    CanonicalKind::Unknown
}

fn matches_any(expr: &str, words: &[&str]) -> bool {
    words.iter().any(|word| contains_word(expr, word))
}

/// Whole-word, case-insensitive containment. Word characters are ASCII
/// alphanumerics and underscore; everything else is a boundary, so the
/// union and generic punctuation in type expressions delimits words.
fn contains_word(expr: &str, word: &str) -> bool {
    let lower = expr.to_ascii_lowercase();
    lower
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert_eq!(normalize_type_expr("string"), CanonicalKind::String);
        assert_eq!(normalize_type_expr("boolean"), CanonicalKind::Boolean);
        assert_eq!(normalize_type_expr("number"), CanonicalKind::Number);
        assert_eq!(normalize_type_expr("bigint"), CanonicalKind::Number);
    }

    #[test]
    fn test_union_with_null_is_the_primitive() {
        assert_eq!(normalize_type_expr("number | null"), CanonicalKind::Number);
        assert_eq!(
            normalize_type_expr("string | undefined"),
            CanonicalKind::String
        );
    }

    #[test]
    fn test_bare_null() {
        assert_eq!(normalize_type_expr("null"), CanonicalKind::Null);
        assert_eq!(normalize_type_expr("undefined"), CanonicalKind::Null);
    }

    #[test]
    fn test_arrays() {
        assert_eq!(normalize_type_expr("string[]"), CanonicalKind::Array);
        assert_eq!(normalize_type_expr("Array<string>"), CanonicalKind::Array);
        // Array marker dominates the element vocabulary
        assert_eq!(normalize_type_expr("Date[]"), CanonicalKind::Array);
    }

    #[test]
    fn test_maps() {
        assert_eq!(
            normalize_type_expr("Record<string, number>"),
            CanonicalKind::Map
        );
        assert_eq!(normalize_type_expr("{ a: string }"), CanonicalKind::Map);
        assert_eq!(normalize_type_expr("{"), CanonicalKind::Map);
        assert_eq!(normalize_type_expr("Map<string, number>"), CanonicalKind::Map);
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(normalize_type_expr("Date"), CanonicalKind::Timestamp);
        assert_eq!(normalize_type_expr("Timestamp"), CanonicalKind::Timestamp);
    }

    #[test]
    fn test_references() {
        assert_eq!(
            normalize_type_expr("DocumentReference"),
            CanonicalKind::Reference
        );
        assert_eq!(
            normalize_type_expr("Reference<User>"),
            CanonicalKind::Reference
        );
    }

    #[test]
    fn test_whole_word_matching() {
        // "PhoneNumber" must not match the "number" keyword
        assert_eq!(normalize_type_expr("PhoneNumber"), CanonicalKind::Unknown);
        // "Stringy" must not match "string"
        assert_eq!(normalize_type_expr("Stringy"), CanonicalKind::Unknown);
    }

    #[test]
    fn test_unrecognized_is_unknown() {
        assert_eq!(normalize_type_expr("Foo"), CanonicalKind::Unknown);
        assert_eq!(normalize_type_expr(""), CanonicalKind::Unknown);
    }

    #[test]
    fn test_order_sensitivity() {
        // Map marker wins over the primitive inside the generic
        assert_eq!(
            normalize_type_expr("Record<string, Date>"),
            CanonicalKind::Map
        );
        // Array marker wins over Record
        assert_eq!(
            normalize_type_expr("Record<string, number>[]"),
            CanonicalKind::Array
        );
    }
}
