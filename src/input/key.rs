// SPDX-License-Identifier: GPL-3.0-only

//! Key identifier classification.
//!
//! Key identifiers are opaque strings. Control keys use the bracketed sentinel
//! form `{name}`; every other non-empty identifier is printable text that is
//! inserted verbatim (which is how multi-character keys such as `while` on the
//! symbols layout work).
//!
//! # Sentinels
//!
//! | Sentinel              | Control            |
//! |-----------------------|--------------------|
//! | `{shift}`, `{lock}`   | [`ControlKey::Shift`]     |
//! | `{extra}`, `{123}`    | [`ControlKey::Symbols`]   |
//! | `{default}`, `{abc}`  | [`ControlKey::Letters`]   |
//! | `{enter}`             | [`ControlKey::Enter`]     |
//! | `{space}`             | [`ControlKey::Space`]     |
//! | `{tab}`               | [`ControlKey::Tab`]       |
//! | `{bksp}`              | [`ControlKey::Backspace`] |
//!
//! Skins can map additional sentinels onto these controls through their
//! `control_aliases` table. A bracketed identifier that is neither built in
//! nor aliased classifies as [`KeyKind::Unknown`].

use std::collections::HashMap;
use std::fmt;

/// A key whose effect is applied on press instead of inserting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// Shift / caps lock.
    Shift,
    /// Switch to the symbols (extra) layout.
    Symbols,
    /// Switch back to the letters layout.
    Letters,
    /// Newline.
    Enter,
    /// Single space.
    Space,
    /// Fixed-width indent.
    Tab,
    /// Delete the last character.
    Backspace,
}

impl ControlKey {
    /// All control keys, in a stable order.
    pub const ALL: [ControlKey; 7] = [
        ControlKey::Shift,
        ControlKey::Symbols,
        ControlKey::Letters,
        ControlKey::Enter,
        ControlKey::Space,
        ControlKey::Tab,
        ControlKey::Backspace,
    ];

    /// Resolves a control name (the text between the braces, or an alias
    /// target) to a control key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shift" | "lock" => Some(ControlKey::Shift),
            "extra" | "123" | "symbols" => Some(ControlKey::Symbols),
            "default" | "abc" | "letters" => Some(ControlKey::Letters),
            "enter" => Some(ControlKey::Enter),
            "space" => Some(ControlKey::Space),
            "tab" => Some(ControlKey::Tab),
            "bksp" | "backspace" => Some(ControlKey::Backspace),
            _ => None,
        }
    }

    /// The canonical sentinel for this control.
    pub fn sentinel(&self) -> &'static str {
        match self {
            ControlKey::Shift => "{shift}",
            ControlKey::Symbols => "{extra}",
            ControlKey::Letters => "{default}",
            ControlKey::Enter => "{enter}",
            ControlKey::Space => "{space}",
            ControlKey::Tab => "{tab}",
            ControlKey::Backspace => "{bksp}",
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// Classification of a key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind<'a> {
    /// A control key.
    Control(ControlKey),
    /// Text inserted as-is.
    Printable(&'a str),
    /// An unrecognized sentinel or an empty identifier. Always a no-op.
    Unknown,
}

/// Returns `true` if the identifier uses the bracketed control form.
///
/// A lone `{` or `}` (or `{}`) is printable, not a sentinel.
pub fn is_sentinel(id: &str) -> bool {
    id.len() >= 3 && id.starts_with('{') && id.ends_with('}')
}

/// Classifies a key identifier.
///
/// `aliases` maps extra sentinels (e.g. `{ghost}`) to control names
/// (e.g. `enter`).
pub fn classify_key<'a>(id: &'a str, aliases: &HashMap<String, String>) -> KeyKind<'a> {
    if id.is_empty() {
        return KeyKind::Unknown;
    }

    if !is_sentinel(id) {
        return KeyKind::Printable(id);
    }

    let name = &id[1..id.len() - 1];
    if let Some(control) = ControlKey::from_name(name) {
        return KeyKind::Control(control);
    }

    match aliases.get(id).and_then(|target| resolve_alias_target(target)) {
        Some(control) => KeyKind::Control(control),
        None => KeyKind::Unknown,
    }
}

/// Resolves an alias target, accepting either a bare name or a sentinel.
pub fn resolve_alias_target(target: &str) -> Option<ControlKey> {
    if is_sentinel(target) {
        ControlKey::from_name(&target[1..target.len() - 1])
    } else {
        ControlKey::from_name(target)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
