// SPDX-License-Identifier: GPL-3.0-only

//! Skin parsing logic for loading JSON skin definitions.
//!
//! This module provides functions for parsing keyboard skins from JSON files
//! and strings. Parsed skins are validated before they are returned.

use crate::layout::types::{ParseError, ParseResult, Skin};
use crate::layout::validation::validate_skin;
use std::fs;
use std::path::Path;

/// Parses a keyboard skin from a JSON file.
///
/// I/O errors (file not found, permission denied, etc.) and JSON errors
/// (malformed JSON, missing required fields, etc.) are reported separately,
/// and both carry the file path.
///
/// # Example
///
/// ```rust,no_run
/// use codeboard::layout::parse_skin_file;
///
/// match parse_skin_file("skins/custom.json") {
///     Ok(result) => {
///         println!("Loaded skin: {}", result.value.name);
///         if result.has_warnings() {
///             println!("Warnings: {}", result.warning_count());
///         }
///     }
///     Err(e) => eprintln!("Failed to parse skin: {}", e),
/// }
/// ```
pub fn parse_skin_file(path: impl AsRef<Path>) -> Result<ParseResult<Skin>, ParseError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let json_str =
        fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, &display_path))?;

    let skin: Skin = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::json_error_with_path(e, &display_path))?;

    validate_skin(skin).map_err(|e| e.with_path(&display_path))
}

/// Parses a keyboard skin from a JSON string.
///
/// Use this when the JSON content is already in memory.
///
/// # Example
///
/// ```rust
/// use codeboard::layout::parse_skin_from_string;
///
/// let json = r#"{
///     "name": "Tiny",
///     "version": "1.0",
///     "layout": { "default": ["a b c {bksp}"] }
/// }"#;
///
/// let result = parse_skin_from_string(json).expect("valid skin");
/// assert_eq!(result.value.name, "Tiny");
/// ```
pub fn parse_skin_from_string(json: &str) -> Result<ParseResult<Skin>, ParseError> {
    let skin: Skin = serde_json::from_str(json).map_err(ParseError::json_error)?;
    validate_skin(skin)
}

// ============================================================================
// Tests
// ============================================================================
