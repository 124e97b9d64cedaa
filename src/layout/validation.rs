// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard skins.
//!
//! This module implements permissive validation that collects warnings for
//! anything suspicious but still usable. The only fatal problem is a skin with
//! no lowercase rows, since every other layout falls back to those.

use crate::app_settings;
use crate::input::{KeyKind, is_sentinel, resolve_alias_target};
use crate::layout::types::{
    LayoutMode, ParseError, ParseResult, Severity, Skin, ValidationIssue,
};
use std::collections::HashSet;

/// Validates a skin and returns it with warnings.
pub fn validate_skin(skin: Skin) -> Result<ParseResult<Skin>, ParseError> {
    let mut warnings = Vec::new();

    validate_required_fields(&skin, &mut warnings);
    validate_layout_rows(&skin, &mut warnings)?;
    validate_accents(&skin, &mut warnings);
    validate_control_aliases(&skin, &mut warnings);
    validate_keywords(&skin, &mut warnings);
    validate_behavior(&skin, &mut warnings);

    Ok(collect_warnings(skin, warnings))
}

/// Validates the skin metadata.
pub fn validate_required_fields(skin: &Skin, warnings: &mut Vec<ValidationIssue>) {
    if skin.name.is_empty() {
        warnings.push(
            ValidationIssue::warning("Skin name is empty", "name")
                .with_suggestion("Provide a descriptive name for the skin"),
        );
    }

    if skin.version.is_empty() {
        warnings.push(
            ValidationIssue::warning("Skin version is empty", "version")
                .with_suggestion("Use semantic versioning (e.g., '1.0', '1.0.0')"),
        );
    }
}

/// Validates the layout table.
///
/// Returns an error if the `default` layout has no keys at all.
pub fn validate_layout_rows(
    skin: &Skin,
    warnings: &mut Vec<ValidationIssue>,
) -> Result<(), ParseError> {
    let has_default_keys = skin
        .layout
        .default
        .iter()
        .any(|row| row.split_whitespace().next().is_some());
    if !has_default_keys {
        return Err(ParseError::validation_error(vec![
            ValidationIssue::new(
                Severity::Error,
                "Default layout has no keys",
                "layout.default",
            )
            .with_suggestion("Add at least one row of space-separated key identifiers"),
        ]));
    }

    for mode in [LayoutMode::Shift, LayoutMode::Extra] {
        if skin.layout.declared_rows(mode).is_empty() {
            warnings.push(
                ValidationIssue::warning(
                    format!("No rows for the {} layout", mode),
                    format!("layout.{}", mode),
                )
                .with_suggestion("The default rows will be shown instead"),
            );
        }
    }

    for mode in LayoutMode::ALL {
        for (row_idx, row) in skin.layout.declared_rows(mode).iter().enumerate() {
            let row_path = format!("layout.{}[{}]", mode, row_idx);

            if row.split_whitespace().next().is_none() {
                warnings.push(ValidationIssue::warning("Row is empty", row_path.clone()));
                continue;
            }

            for key in row.split_whitespace() {
                if matches!(skin.classify(key), KeyKind::Unknown) {
                    warnings.push(
                        ValidationIssue::warning(
                            format!("Unknown control key '{}'", key),
                            row_path.clone(),
                        )
                        .with_suggestion(
                            "Use a built-in control or map it in 'control_aliases'; \
                             unknown controls do nothing",
                        ),
                    );
                }
            }
        }
    }

    Ok(())
}

/// Validates the accent map against the layout table.
pub fn validate_accents(skin: &Skin, warnings: &mut Vec<ValidationIssue>) {
    for (key, options) in skin.accents.iter() {
        let path = format!("accents[{}]", key);

        if options.is_empty() {
            warnings.push(
                ValidationIssue::warning("Accent entry has no options", path.clone())
                    .with_suggestion("Remove the entry or add at least one option"),
            );
        }

        let mut seen = HashSet::new();
        for option in options {
            if !seen.insert(option.as_str()) {
                warnings.push(ValidationIssue::warning(
                    format!("Duplicate accent option '{}'", option),
                    path.clone(),
                ));
            }
        }

        if is_sentinel(key) {
            warnings.push(ValidationIssue::warning(
                "Control keys never open an accent popup",
                path.clone(),
            ));
        } else if !skin.layout.contains_key(key) {
            warnings.push(
                ValidationIssue::warning("Accent key appears on no layout", path)
                    .with_suggestion("Add the key to a layout row or remove the entry"),
            );
        }
    }
}

/// Validates control aliases.
pub fn validate_control_aliases(skin: &Skin, warnings: &mut Vec<ValidationIssue>) {
    for (alias, target) in &skin.control_aliases {
        let path = format!("control_aliases[{}]", alias);

        if !is_sentinel(alias) {
            warnings.push(
                ValidationIssue::warning("Alias is not a bracketed identifier", path.clone())
                    .with_suggestion("Write aliases as '{name}'"),
            );
        }

        if resolve_alias_target(target).is_none() {
            warnings.push(
                ValidationIssue::warning(
                    format!("Alias targets unknown control '{}'", target),
                    path,
                )
                .with_suggestion(
                    "Use one of: shift, extra, default, enter, space, tab, bksp",
                ),
            );
        }
    }
}

/// Validates the keyword dictionary.
pub fn validate_keywords(skin: &Skin, warnings: &mut Vec<ValidationIssue>) {
    if skin.keywords.is_empty() {
        warnings.push(
            ValidationIssue::warning("Keyword dictionary is empty", "keywords")
                .with_suggestion("Omit the field to use the Python keywords"),
        );
    }
}

/// Validates the behavior block.
pub fn validate_behavior(skin: &Skin, warnings: &mut Vec<ValidationIssue>) {
    if skin.behavior.hold_threshold_ms == 0 {
        warnings.push(
            ValidationIssue::warning(
                "Hold threshold is zero; every accent key opens its popup on the next tick",
                "behavior.hold_threshold_ms",
            )
            .with_suggestion("Use a positive threshold such as 500"),
        );
    } else if skin.behavior.hold_threshold_ms > app_settings::MAX_HOLD_THRESHOLD_MS {
        warnings.push(
            ValidationIssue::warning(
                format!(
                    "Hold threshold of {} ms is longer than {} ms; accent popups will practically never open",
                    skin.behavior.hold_threshold_ms,
                    app_settings::MAX_HOLD_THRESHOLD_MS
                ),
                "behavior.hold_threshold_ms",
            )
            .with_suggestion("Use a threshold such as 500"),
        );
    }

    if skin.behavior.tab_width > app_settings::MAX_TAB_WIDTH {
        warnings.push(ValidationIssue::warning(
            format!(
                "Tab width {} is capped at {} spaces",
                skin.behavior.tab_width,
                app_settings::MAX_TAB_WIDTH
            ),
            "behavior.tab_width",
        ));
    }
}

/// Collects and sorts validation warnings.
pub fn collect_warnings(skin: Skin, mut warnings: Vec<ValidationIssue>) -> ParseResult<Skin> {
    // Errors first, then by field path
    warnings.sort_by(|a, b| match (a.severity, b.severity) {
        (Severity::Error, Severity::Warning) => std::cmp::Ordering::Less,
        (Severity::Warning, Severity::Error) => std::cmp::Ordering::Greater,
        _ => a.field_path.cmp(&b.field_path),
    });

    ParseResult::with_warnings(skin, warnings)
}

// ============================================================================
// Tests
// ============================================================================
