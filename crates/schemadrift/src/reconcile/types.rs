//! Core types for the reconciliation engine.
//!
//! Two schema maps (declared and observed), the match links between their
//! keys, and the verdict/report types the differ produces. Everything here
//! is plain data; the component modules own the behavior.

use chrono::{DateTime, Utc};
use schemadrift_protocol::CanonicalKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Declared side
// ============================================================================

/// One field of a declared type: name, the raw type expression it was
/// parsed from (kept for diagnostics), and its normalized kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredField {
    pub name: String,
    pub raw_type: String,
    pub kind: CanonicalKind,
}

/// A named structural type extracted from source text.
///
/// Fields keep declaration order. Immutable once the extractor closes the
/// declaration body; lifetime is one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredType {
    pub name: String,
    pub fields: Vec<DeclaredField>,
}

impl DeclaredType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Insert a field. A duplicate name overwrites the earlier entry in
    /// place, keeping its original position (last occurrence wins).
    pub fn insert_field(
        &mut self,
        name: impl Into<String>,
        raw_type: impl Into<String>,
        kind: CanonicalKind,
    ) {
        let field = DeclaredField {
            name: name.into(),
            raw_type: raw_type.into(),
            kind,
        };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, name: &str) -> Option<&DeclaredField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// All declared types found in one extraction run, keyed by name.
///
/// Later declarations with the same name overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredSchema {
    types: BTreeMap<String, DeclaredType>,
}

impl DeclaredSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, declared: DeclaredType) {
        self.types.insert(declared.name.clone(), declared);
    }

    pub fn get(&self, name: &str) -> Option<&DeclaredType> {
        self.types.get(name)
    }

    /// Type names in sorted order (stable candidate order for matching).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclaredType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Collapse into the name -> field -> kind mapping used by the report.
    pub fn to_kind_map(&self) -> BTreeMap<String, BTreeMap<String, CanonicalKind>> {
        self.types
            .iter()
            .map(|(name, declared)| {
                let fields = declared
                    .fields
                    .iter()
                    .map(|f| (f.name.clone(), f.kind))
                    .collect();
                (name.clone(), fields)
            })
            .collect()
    }
}

// ============================================================================
// Observed side
// ============================================================================

/// One observed field path and its last-seen kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedField {
    /// Dot-separated path; nested map fields get `parent.child` paths
    pub path: String,
    pub kind: CanonicalKind,
}

/// The inferred shape of one live collection, merged across sampled records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCollection {
    pub name: String,
    fields: Vec<ObservedField>,
}

impl ObservedCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Record a kind for a field path. Inserting an existing path overwrites
    /// the prior kind at its original position (last write wins; no type
    /// unions are tracked).
    pub fn insert(&mut self, path: impl Into<String>, kind: CanonicalKind) {
        let path = path.into();
        match self.fields.iter_mut().find(|f| f.path == path) {
            Some(existing) => existing.kind = kind,
            None => self.fields.push(ObservedField { path, kind }),
        }
    }

    pub fn kind_of(&self, path: &str) -> Option<CanonicalKind> {
        self.fields.iter().find(|f| f.path == path).map(|f| f.kind)
    }

    pub fn fields(&self) -> &[ObservedField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All collections observed in one inference run, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedSchema {
    collections: BTreeMap<String, ObservedCollection>,
}

impl ObservedSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: ObservedCollection) {
        self.collections.insert(collection.name.clone(), collection);
    }

    pub fn get(&self, name: &str) -> Option<&ObservedCollection> {
        self.collections.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObservedCollection> {
        self.collections.values()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn to_kind_map(&self) -> BTreeMap<String, BTreeMap<String, CanonicalKind>> {
        self.collections
            .iter()
            .map(|(name, collection)| {
                let fields = collection
                    .fields
                    .iter()
                    .map(|f| (f.path.clone(), f.kind))
                    .collect();
                (name.clone(), fields)
            })
            .collect()
    }
}

// ============================================================================
// Match links
// ============================================================================

/// The strategy that linked a collection to a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Names are byte-equal
    Exact,
    /// Names are equal ignoring ASCII case
    CaseInsensitive,
    /// Names are equal after stripping one trailing `s` from each side
    Singularized,
    /// One name contains the other, ignoring case
    Substring,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Singularized => "singularized",
            Self::Substring => "substring",
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Exact | Self::CaseInsensitive => Confidence::High,
            Self::Singularized => Confidence::Medium,
            Self::Substring => Confidence::Low,
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much a match link should be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// The chosen correspondence between one collection and one declared type.
///
/// At most one per collection; derived fresh each run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLink {
    pub collection: String,
    pub declared_type: String,
    pub strategy: MatchStrategy,
    pub confidence: Confidence,
}

// ============================================================================
// Verdicts
// ============================================================================

/// Per-field classification result of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// Declared and observed kinds agree
    Matched,
    /// Both sides know the field but disagree on its kind
    TypeMismatch,
    /// Observed in the store, never declared
    UnexpectedField,
    /// Declared, never observed in any sample
    MissingField,
}

impl std::fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Matched => "matched",
            Self::TypeMismatch => "type_mismatch",
            Self::UnexpectedField => "unexpected_field",
            Self::MissingField => "missing_field",
        };
        write!(f, "{}", s)
    }
}

/// One field's verdict, with whichever kinds were known on each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVerdict {
    pub field: String,
    pub verdict: VerdictKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_kind: Option<CanonicalKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_kind: Option<CanonicalKind>,
}

impl FieldVerdict {
    pub fn matched(field: impl Into<String>, kind: CanonicalKind) -> Self {
        Self {
            field: field.into(),
            verdict: VerdictKind::Matched,
            declared_kind: Some(kind),
            observed_kind: Some(kind),
        }
    }

    /// A nested path covered by a declared map field.
    pub fn matched_under_map(field: impl Into<String>, observed: CanonicalKind) -> Self {
        Self {
            field: field.into(),
            verdict: VerdictKind::Matched,
            declared_kind: Some(CanonicalKind::Map),
            observed_kind: Some(observed),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        declared: CanonicalKind,
        observed: CanonicalKind,
    ) -> Self {
        Self {
            field: field.into(),
            verdict: VerdictKind::TypeMismatch,
            declared_kind: Some(declared),
            observed_kind: Some(observed),
        }
    }

    pub fn unexpected(field: impl Into<String>, observed: CanonicalKind) -> Self {
        Self {
            field: field.into(),
            verdict: VerdictKind::UnexpectedField,
            declared_kind: None,
            observed_kind: Some(observed),
        }
    }

    pub fn missing(field: impl Into<String>, declared: CanonicalKind) -> Self {
        Self {
            field: field.into(),
            verdict: VerdictKind::MissingField,
            declared_kind: Some(declared),
            observed_kind: None,
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// One collection's comparison: its link (if any) and ordered verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionComparison {
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    pub verdicts: Vec<FieldVerdict>,
}

/// Global counters summed across all collections' verdict sequences.
///
/// Percentages are intentionally absent: consumers derive them, and only
/// when the denominators are nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub collections_total: u64,
    pub collections_matched: u64,
    pub fields_total: u64,
    pub fields_matched: u64,
    pub type_mismatches: u64,
    pub missing_fields: u64,
}

/// The diff section of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub per_collection: Vec<CollectionComparison>,
    pub summary: ComparisonSummary,
}

/// The sole externally visible artifact of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub declared_schema: BTreeMap<String, BTreeMap<String, CanonicalKind>>,
    pub observed_schema: BTreeMap<String, BTreeMap<String, CanonicalKind>>,
    pub comparison: Comparison,
    pub generated_at: DateTime<Utc>,
    pub offline_mode: bool,
}
