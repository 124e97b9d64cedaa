// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard skins.
//!
//! This module defines the error and validation types shared by the skin and
//! script parsers, and the skin data model itself: the layout table, the
//! accent map and the keyword dictionary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::EngineConfig;
use crate::input::{KeyKind, classify_key};

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents the skin from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while loading a skin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "layout.shift[2]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Shorthand for a warning.
    pub fn warning(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, field_path)
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for skin and script loading.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading a file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// Fatal validation errors
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },

    /// A built-in skin was requested that does not exist
    UnknownSkin {
        /// The requested name
        name: String,
        /// Names that do exist
        available: Vec<String>,
    },
}

impl ParseError {
    /// Creates an I/O error with context.
    pub fn io_error(source: std::io::Error) -> Self {
        Self::IoError {
            source,
            file_path: None,
            suggestion: None,
        }
    }

    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: None,
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }

    /// Attaches a file path to errors that don't carry one yet.
    pub fn with_path(self, path: &str) -> Self {
        match self {
            ParseError::ValidationError {
                issues,
                file_path: None,
            } => ParseError::ValidationError {
                issues,
                file_path: Some(path.to_string()),
            },
            other => other,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
                suggestion,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ParseError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for file '{}'", path)?;
                }
                writeln!(f, " with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "  {}. {}", i + 1, issue)?;
                    if i < issues.len() - 1 {
                        writeln!(f)?;
                    }
                }
            }
            ParseError::UnknownSkin { name, available } => {
                write!(
                    f,
                    "Unknown skin '{}' (available: {})",
                    name,
                    available.join(", ")
                )?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of a successful parse with optional warnings.
///
/// Parsing is permissive: a usable value is returned even when non-fatal
/// validation issues are found.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully parsed value
    pub value: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with no warnings.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Creates a new parse result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the value, discarding warnings.
    pub fn into_value(self) -> T {
        self.value
    }
}

// ============================================================================
// Skin Data Structures
// ============================================================================

/// The active set of key labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Lowercase letters.
    #[default]
    Default,
    /// Uppercase letters (and the shifted symbol row).
    Shift,
    /// Digits, symbols and keyword keys.
    Extra,
}

impl LayoutMode {
    /// All modes, in declaration order.
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Default, LayoutMode::Shift, LayoutMode::Extra];

    /// The mode's name as used in skin files.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Default => "default",
            LayoutMode::Shift => "shift",
            LayoutMode::Extra => "extra",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows of key identifiers for each layout mode.
///
/// Each row is a space-separated string of key identifiers:
///
/// ```json
/// { "default": ["q w e r t y", "{shift} z x c {bksp}"], "shift": [], "extra": [] }
/// ```
///
/// A mode with no rows falls back to the `default` rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutTable {
    /// Rows for the lowercase layout
    #[serde(default)]
    pub default: Vec<String>,
    /// Rows for the shifted layout
    #[serde(default)]
    pub shift: Vec<String>,
    /// Rows for the symbols layout
    #[serde(default)]
    pub extra: Vec<String>,
}

impl LayoutTable {
    /// Returns the raw row strings defined for a mode, without fallback.
    pub fn declared_rows(&self, mode: LayoutMode) -> &[String] {
        match mode {
            LayoutMode::Default => &self.default,
            LayoutMode::Shift => &self.shift,
            LayoutMode::Extra => &self.extra,
        }
    }

    /// Returns the row strings for a mode, falling back to `default`.
    pub fn rows(&self, mode: LayoutMode) -> &[String] {
        let rows = self.declared_rows(mode);
        if rows.is_empty() { &self.default } else { rows }
    }

    /// Returns the key identifiers for a mode, split into rows.
    pub fn keys(&self, mode: LayoutMode) -> Vec<Vec<&str>> {
        self.rows(mode)
            .iter()
            .map(|row| row.split_whitespace().collect())
            .collect()
    }

    /// Returns `true` if any mode contains the key.
    pub fn contains_key(&self, key: &str) -> bool {
        LayoutMode::ALL.iter().any(|mode| {
            self.declared_rows(*mode)
                .iter()
                .any(|row| row.split_whitespace().any(|k| k == key))
        })
    }
}

/// Ordered long-press alternatives per base key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccentMap(pub HashMap<String, Vec<String>>);

impl AccentMap {
    /// Returns the alternatives for a key, or `None` if the key has none.
    pub fn options(&self, key: &str) -> Option<&[String]> {
        self.0
            .get(key)
            .map(Vec::as_slice)
            .filter(|options| !options.is_empty())
    }

    /// Returns `true` if the key opens an accent popup when held.
    pub fn contains(&self, key: &str) -> bool {
        self.options(key).is_some()
    }

    /// Iterates over all entries, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, options: Vec<String>) {
        self.0.insert(key.into(), options);
    }
}

/// Python keywords offered as completions, in declaration order.
pub const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

fn default_keywords() -> Vec<String> {
    PYTHON_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// A complete keyboard skin.
///
/// Skins are purely declarative: the engine is parameterized by them and
/// contains no skin-specific logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    /// Human-readable name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional author
    #[serde(default)]
    pub author: Option<String>,

    /// Skin version
    #[serde(default)]
    pub version: String,

    /// Key rows per layout mode
    pub layout: LayoutTable,

    /// Long-press alternatives
    #[serde(default)]
    pub accents: AccentMap,

    /// Completion dictionary, in suggestion order
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Display labels for keys (usually sentinels)
    #[serde(default)]
    pub display: HashMap<String, String>,

    /// Extra sentinels mapped to control names (e.g. `"{ghost}": "enter"`)
    #[serde(default)]
    pub control_aliases: HashMap<String, String>,

    /// Engine behavior overrides
    #[serde(default)]
    pub behavior: EngineConfig,
}

impl Default for Skin {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            author: None,
            version: String::new(),
            layout: LayoutTable::default(),
            accents: AccentMap::default(),
            keywords: default_keywords(),
            display: HashMap::new(),
            control_aliases: HashMap::new(),
            behavior: EngineConfig::default(),
        }
    }
}

impl Skin {
    /// Classifies a key identifier using this skin's aliases.
    pub fn classify<'a>(&self, key: &'a str) -> KeyKind<'a> {
        classify_key(key, &self.control_aliases)
    }

    /// Returns the display label for a key (the key itself if none is set).
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.display.get(key).map(String::as_str).unwrap_or(key)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: JSON errors carry the line number
    #[test]
    fn test_json_error_includes_line_number() {
        let invalid_json = r#"{
            "name": "Broken",
            "layout": { "default": ["a b"] }
            "accents": {}
        }"#;

        let err = serde_json::from_str::<Skin>(invalid_json).unwrap_err();
        let parse_error = ParseError::json_error(err);

        match &parse_error {
            ParseError::JsonError { line_number, .. } => {
                assert_eq!(*line_number, Some(4), "Error should point at line 4");
            }
            _ => panic!("Expected JsonError variant"),
        }

        let display = parse_error.to_string();
        assert!(display.contains("line 4"));
        assert!(display.contains("Suggestion"));
    }

    /// Test 2: Validation issue display
    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue::warning("Accent key never appears", "accents[q]")
            .with_suggestion("Add the key to a layout row");

        let display = issue.to_string();
        assert!(display.starts_with("[WARNING] accents[q]: Accent key never appears"));
        assert!(display.contains("Suggestion: Add the key to a layout row"));
    }

    /// Test 3: Layout rows fall back to default
    #[test]
    fn test_layout_rows_fallback() {
        let table = LayoutTable {
            default: vec!["q w e".into(), "{shift} a s".into()],
            shift: vec!["Q W E".into()],
            extra: Vec::new(),
        };

        assert_eq!(table.rows(LayoutMode::Shift), &["Q W E".to_string()]);
        assert_eq!(table.rows(LayoutMode::Extra), table.rows(LayoutMode::Default));
        assert_eq!(
            table.keys(LayoutMode::Default),
            vec![vec!["q", "w", "e"], vec!["{shift}", "a", "s"]]
        );
        assert!(table.contains_key("Q"));
        assert!(!table.contains_key("z"));
    }

    /// Test 4: Accent map treats empty option lists as absent
    #[test]
    fn test_accent_map_options() {
        let mut accents = AccentMap::default();
        accents.insert("(", vec!["[".into(), "{".into()]);
        accents.insert("x", Vec::new());

        assert_eq!(
            accents.options("("),
            Some(&["[".to_string(), "{".to_string()][..])
        );
        assert!(accents.contains("("));
        assert!(!accents.contains("x"));
        assert!(!accents.contains("y"));
    }

    /// Test 5: Skin defaults
    #[test]
    fn test_skin_json_defaults() {
        let skin: Skin = serde_json::from_str(
            r#"{ "name": "Tiny", "layout": { "default": ["a b c"] } }"#,
        )
        .unwrap();

        assert_eq!(skin.keywords.len(), PYTHON_KEYWORDS.len());
        assert_eq!(skin.keywords[0], "False");
        assert!(skin.accents.0.is_empty());
        assert_eq!(skin.behavior, EngineConfig::default());
        assert_eq!(skin.display_label("a"), "a");
    }

    /// Test 6: Layout mode names
    #[test]
    fn test_layout_mode_names() {
        for mode in LayoutMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }

    /// Test 7: Unknown skin error lists alternatives
    #[test]
    fn test_unknown_skin_display() {
        let err = ParseError::UnknownSkin {
            name: "qwertz".into(),
            available: vec!["plain".into(), "ultimate".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown skin 'qwertz' (available: plain, ultimate)"
        );
    }
}
