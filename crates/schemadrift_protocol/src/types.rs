//! Canonical kind enumeration and the closed store value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Canonical Kinds
// ============================================================================

/// Canonical field kind - the SINGLE SOURCE OF TRUTH for schema comparison.
///
/// Declared type expressions (free text) and observed runtime values both
/// normalize into this closed set. The two sides are only ever compared
/// through these kinds, never through their raw representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalKind {
    /// UTF-8 text
    String,

    /// Integer or floating point (document stores do not distinguish)
    Number,

    /// true/false
    Boolean,

    /// Ordered list of values (element kinds are not tracked)
    Array,

    /// Nested field mapping / composite object
    Map,

    /// Store-native timestamp or a declared date/time type
    Timestamp,

    /// Reference to another document
    Reference,

    /// Explicit null
    Null,

    /// Fallback for anything unrecognized - reported, never dropped
    #[default]
    Unknown,
}

impl CanonicalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Map => "map",
            Self::Timestamp => "timestamp",
            Self::Reference => "reference",
            Self::Null => "null",
            Self::Unknown => "unknown",
        }
    }

    /// Returns all kinds (for exhaustiveness checks in tests).
    pub fn all() -> Vec<CanonicalKind> {
        vec![
            Self::String,
            Self::Number,
            Self::Boolean,
            Self::Array,
            Self::Map,
            Self::Timestamp,
            Self::Reference,
            Self::Null,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for CanonicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "array" => Ok(Self::Array),
            "map" => Ok(Self::Map),
            "timestamp" => Ok(Self::Timestamp),
            "reference" => Ok(Self::Reference),
            "null" => Ok(Self::Null),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid canonical kind: '{}'", s)),
        }
    }
}

// ============================================================================
// Store Values
// ============================================================================

/// A runtime value read from the document store.
///
/// Closed tagged variant so that kind inference is an exhaustive, checked
/// match at the store-client boundary. Store backends convert whatever wire
/// or file representation they read into this type; nothing downstream ever
/// inspects raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StoreValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Store-native timestamp (the store distinguishes these from strings)
    Timestamp(DateTime<Utc>),
    List(Vec<StoreValue>),
    /// Nested field mapping, in document order
    Map(Vec<(String, StoreValue)>),
}

impl StoreValue {
    /// Classify this value into its canonical kind.
    ///
    /// Value classification is introspective and total: every variant has
    /// exactly one kind. Text normalization (for declared types) lives in
    /// the engine and is a separate concern.
    pub fn kind(&self) -> CanonicalKind {
        match self {
            StoreValue::Null => CanonicalKind::Null,
            StoreValue::Boolean(_) => CanonicalKind::Boolean,
            StoreValue::Number(_) => CanonicalKind::Number,
            StoreValue::String(_) => CanonicalKind::String,
            StoreValue::Timestamp(_) => CanonicalKind::Timestamp,
            StoreValue::List(_) => CanonicalKind::Array,
            StoreValue::Map(_) => CanonicalKind::Map,
        }
    }

    /// Returns the nested field mapping if this value is a map.
    pub fn as_map(&self) -> Option<&[(String, StoreValue)]> {
        match self {
            StoreValue::Map(fields) => Some(fields),
            _ => None,
        }
    }
}

/// One sampled record: an id plus its ordered field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Record id within its collection
    pub id: String,
    /// Top-level fields in document order
    pub fields: Vec<(String, StoreValue)>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Vec<(String, StoreValue)>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_round_trip() {
        for kind in CanonicalKind::all() {
            let parsed: CanonicalKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&CanonicalKind::Timestamp).unwrap();
        assert_eq!(json, "\"timestamp\"");
        let back: CanonicalKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CanonicalKind::Timestamp);
    }

    #[test]
    fn test_kind_parse_invalid() {
        assert!("datetime".parse::<CanonicalKind>().is_err());
    }

    #[test]
    fn test_store_value_kinds() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(StoreValue::Null.kind(), CanonicalKind::Null);
        assert_eq!(StoreValue::Boolean(true).kind(), CanonicalKind::Boolean);
        assert_eq!(StoreValue::Number(3.5).kind(), CanonicalKind::Number);
        assert_eq!(
            StoreValue::String("x".into()).kind(),
            CanonicalKind::String
        );
        assert_eq!(StoreValue::Timestamp(ts).kind(), CanonicalKind::Timestamp);
        assert_eq!(StoreValue::List(vec![]).kind(), CanonicalKind::Array);
        assert_eq!(StoreValue::Map(vec![]).kind(), CanonicalKind::Map);
    }

    #[test]
    fn test_as_map() {
        let map = StoreValue::Map(vec![("a".to_string(), StoreValue::Number(1.0))]);
        assert_eq!(map.as_map().unwrap().len(), 1);
        assert!(StoreValue::Null.as_map().is_none());
    }
}
