//! Declaration extractor: TypeScript type declarations from a source tree.
//!
//! Deliberately not a TypeScript parser. Each file goes through a two-phase
//! scan: find an `export type|interface Name` header, balance braces from
//! the declaration's opening `{` to slice out its body, then run a
//! field-line pattern over the slice. Brace-depth tracking is what makes
//! nested inline object types tolerable without a grammar; only `{`/`}`
//! depth matters.
//!
//! Failure policy: an unreadable file is skipped with a diagnostic and the
//! walk continues. A missing root directory is the caller's signal to
//! proceed with an empty declared schema.

use super::error::{ReconcileError, Result};
use super::normalize::normalize_type_expr;
use super::types::{DeclaredSchema, DeclaredType};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Declaration header: `export type Name` or `export interface Name`.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+(?:type|interface)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

/// One field line: name, optional `?`/`!` marker (ignored for kind
/// purposes), and the raw type text up to `;`, `,`, or end of line.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:readonly\s+)?([A-Za-z_$][A-Za-z0-9_$]*)\s*[?!]?\s*:\s*([^;,\r\n]+)")
        .unwrap()
});

/// Directory names never worth descending into when scanning a source tree.
pub const DEFAULT_EXCLUDE_DIR_NAMES: &[&str] =
    &["node_modules", ".git", "dist", "build", "coverage"];

/// Configuration for the declaration walk.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// File extensions that carry type declarations
    pub extensions: Vec<String>,
    /// Directory names to skip entirely
    pub exclude_dir_names: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["ts".to_string(), "tsx".to_string()],
            exclude_dir_names: DEFAULT_EXCLUDE_DIR_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Result of one extraction run.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Declared types found, name-keyed, last declaration wins
    pub schema: DeclaredSchema,
    /// Files whose extension matched and were opened
    pub files_scanned: usize,
    /// Files skipped because they could not be read or decoded
    pub files_skipped: usize,
}

/// Walks a directory tree and extracts exported type declarations.
pub struct DeclarationExtractor {
    root: PathBuf,
    config: ExtractorConfig,
}

impl DeclarationExtractor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ExtractorConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Run the extraction.
    ///
    /// Running twice over an unchanged tree yields an identical schema: the
    /// walk is sorted, so last-wins merges are deterministic.
    pub fn extract(&self) -> Result<ExtractionResult> {
        if !self.root.is_dir() {
            return Err(ReconcileError::RootNotFound(
                self.root.display().to_string(),
            ));
        }

        let mut schema = DeclaredSchema::new();
        let mut files_scanned = 0;
        let mut files_skipped = 0;

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.depth() > 0
                    && entry.file_type().is_dir()
                    && self.is_excluded_dir(entry.path()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                continue;
            }

            files_scanned += 1;
            let content = match fs::read_to_string(entry.path()) {
                Ok(c) => c,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Skipping unreadable source file");
                    files_skipped += 1;
                    continue;
                }
            };

            for declared in extract_declarations(&content) {
                schema.insert(declared);
            }
        }

        info!(
            declarations = schema.len(),
            files = files_scanned,
            skipped = files_skipped,
            root = %self.root.display(),
            "Declaration scan complete"
        );

        Ok(ExtractionResult {
            schema,
            files_scanned,
            files_skipped,
        })
    }

    fn is_excluded_dir(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.config.exclude_dir_names.iter().any(|ex| ex == name))
            .unwrap_or(false)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.config.extensions.iter().any(|want| want == ext))
            .unwrap_or(false)
    }
}

/// Extract every brace-bodied exported declaration from one file's text.
pub fn extract_declarations(content: &str) -> Vec<DeclaredType> {
    let mut declarations = Vec::new();

    let headers: Vec<(usize, usize, &str)> = HEADER_RE
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            (whole.start(), whole.end(), caps.get(1).unwrap().as_str())
        })
        .collect();

    for (index, (_, header_end, name)) in headers.iter().enumerate() {
        // The opening brace must appear before the next declaration header;
        // a brace past that point belongs to someone else. Aliases without
        // a body (`export type Id = string;`) are out of scope.
        let region_end = headers
            .get(index + 1)
            .map(|(start, _, _)| *start)
            .unwrap_or(content.len());
        let Some(open_offset) = content[*header_end..region_end].find('{') else {
            continue;
        };
        let body_start = header_end + open_offset + 1;
        let Some(body) = slice_braced_body(&content[body_start..]) else {
            // Unbalanced braces: the file is truncated or malformed
            continue;
        };

        let mut declared = DeclaredType::new(*name);
        for caps in FIELD_RE.captures_iter(body) {
            let field_name = caps.get(1).unwrap().as_str();
            let raw_type = caps.get(2).unwrap().as_str().trim();
            declared.insert_field(field_name, raw_type, normalize_type_expr(raw_type));
        }
        declarations.push(declared);
    }

    declarations
}

/// Balanced brace-depth slice: starts just after the opening brace at depth
/// 1 and returns the text up to (not including) the brace that closes it.
fn slice_braced_body(rest: &str) -> Option<&str> {
    let mut depth = 1usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..i]);
                }
            }
            _ => {}
        }
    }
    None
}
