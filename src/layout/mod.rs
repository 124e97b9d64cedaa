// SPDX-License-Identifier: GPL-3.0-only

//! JSON skins for Codeboard keyboards.
//!
//! A skin bundles everything that distinguishes one keyboard from another:
//! the key rows for each layout mode, the long-press accent map, the keyword
//! dictionary used for suggestions, display labels and behavior overrides. The
//! engine is parameterized by a skin and contains no skin-specific logic.
//!
//! # Features
//!
//! - **Declarative layouts**: Rows of space-separated key identifiers per layout mode
//! - **Accent map**: Ordered long-press alternatives, including whole keywords
//! - **Permissive validation**: Usable skins load with warnings instead of failing
//! - **Helpful error messages**: Includes line numbers, field paths, and suggestions
//! - **Built-in skins**: Embedded in the binary and loaded by name
//!
//! # Skin Format
//!
//! ```json
//! {
//!     "name": "Example",
//!     "version": "1.0",
//!     "layout": {
//!         "default": ["q w e r t y", "{shift} a s d {bksp}", "{extra} {space} {enter}"],
//!         "shift":   ["Q W E R T Y", "{shift} A S D {bksp}", "{extra} {space} {enter}"],
//!         "extra":   ["1 2 3 while", "{default} {space} {enter}"]
//!     },
//!     "accents": { "w": ["while"], "(": ["[", "{"] },
//!     "display": { "{bksp}": "⌫" },
//!     "control_aliases": { "{ghost}": "enter" },
//!     "behavior": { "shift_mode": "one_shot" }
//! }
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use codeboard::layout::{builtin_skin, LayoutMode};
//!
//! let result = builtin_skin("ultimate").expect("built-in skin");
//! for warning in &result.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//!
//! let skin = result.into_value();
//! assert!(skin.accents.contains("("));
//! assert_eq!(skin.layout.keys(LayoutMode::Default)[1][0], "q");
//! ```
//!
//! ## Error Handling
//!
//! Non-fatal validation issues are returned as warnings in the `ParseResult`,
//! while fatal errors (I/O, JSON syntax, a skin without default rows, an
//! unknown built-in name) return a `ParseError`.
//!
//! ```rust,no_run
//! use codeboard::layout::{parse_skin_file, ParseError};
//!
//! match parse_skin_file("path/to/skin.json") {
//!     Ok(result) => {
//!         let skin = result.into_value();
//!         println!("Loaded {}", skin.name);
//!     }
//!     Err(ParseError::JsonError { source, line_number, .. }) => {
//!         eprintln!("JSON parse error at line {:?}: {}", line_number, source);
//!     }
//!     Err(e) => {
//!         eprintln!("Parse error: {}", e);
//!     }
//! }
//! ```

// Sub-modules
pub mod parser;
pub mod skins;
pub mod types;
pub mod validation;

// Re-export public API - Error handling types
pub use types::{ParseError, ParseResult, Severity, ValidationIssue};

// Re-export public API - Parser functions
pub use parser::{parse_skin_file, parse_skin_from_string};
pub use skins::{builtin_skin, builtin_skin_names};

// Re-export public API - Data structures
pub use types::{AccentMap, LayoutMode, LayoutTable, PYTHON_KEYWORDS, Skin};

/// Loads a skin by built-in name or, failing that, as a file path.
///
/// Warnings are logged and dropped.
pub fn load_skin(name_or_path: &str) -> Result<Skin, ParseError> {
    let result = if builtin_skin_names().iter().any(|n| n == name_or_path) {
        builtin_skin(name_or_path)?
    } else {
        parse_skin_file(name_or_path)?
    };

    for warning in &result.warnings {
        tracing::warn!("Skin '{}': {}", name_or_path, warning);
    }
    tracing::info!(
        "Loaded skin '{}' ({} warning(s))",
        result.value.name,
        result.warning_count()
    );

    Ok(result.into_value())
}

// ============================================================================
// Public API Integration Tests
// ============================================================================
