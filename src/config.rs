// SPDX-License-Identifier: GPL-3.0-only

//! Behavior configuration for the keyboard engine.
//!
//! The keyboard skins in the wild disagree on a handful of rules (whether shift
//! reverts after one key, how long the double-tap window is, where the accent
//! popup sits). Rather than hard-coding one variant, every such rule is a field
//! here and skins carry their own `behavior` block.

use serde::{Deserialize, Serialize};

use crate::app_settings;

/// How the shift key behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    /// A single tap shifts the next printable key only; a double tap locks.
    #[default]
    OneShot,
    /// Shift toggles between the letter layouts and never reverts. Shifted
    /// is reported as locked.
    Toggle,
    /// Shift keys do nothing.
    Disabled,
}

/// Horizontal placement of the accent popup relative to the held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupAlignment {
    /// The popup's right edge lines up with the key's right edge.
    #[default]
    RightEdge,
    /// Keys on the left half open the popup left-aligned, keys on the right
    /// half open it right-aligned (with a small nudge).
    Adaptive,
}

/// Timing and behavior knobs for the keyboard engine.
///
/// Every field has a default, so a skin can override just the ones it needs:
///
/// ```json
/// { "behavior": { "shift_mode": "toggle", "hold_threshold_ms": 400 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hold duration before an accent popup opens.
    pub hold_threshold_ms: u64,
    /// Maximum gap between two shift taps to count as a double tap. A key
    /// typed within this gap after a shift tap keeps the shift. Zero turns
    /// caps lock off and makes shift revert after every key.
    pub double_tap_window_ms: u64,
    /// Number of spaces inserted by the tab key.
    pub tab_width: usize,
    /// Maximum number of keyword suggestions.
    pub max_suggestions: usize,
    /// Shift key behavior.
    pub shift_mode: ShiftMode,
    /// Accent popup placement.
    pub popup_alignment: PopupAlignment,
    /// Width of one accent option button.
    pub accent_button_width: f32,
    /// Height of the accent popup.
    pub accent_button_height: f32,
    /// Vertical distance from the key top to the popup top.
    pub popup_top_offset: f32,
    /// Vibration pattern passed to the host on keystrokes. Zero disables it.
    pub haptic_pattern_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: app_settings::HOLD_THRESHOLD_MS,
            double_tap_window_ms: app_settings::DOUBLE_TAP_WINDOW_MS,
            tab_width: app_settings::TAB_WIDTH,
            max_suggestions: app_settings::MAX_SUGGESTIONS,
            shift_mode: ShiftMode::default(),
            popup_alignment: PopupAlignment::default(),
            accent_button_width: app_settings::ACCENT_BUTTON_WIDTH,
            accent_button_height: app_settings::ACCENT_BUTTON_HEIGHT,
            popup_top_offset: app_settings::POPUP_TOP_OFFSET,
            haptic_pattern_ms: app_settings::HAPTIC_PATTERN_MS,
        }
    }
}

impl EngineConfig {
    /// The indent inserted by the tab key, at most
    /// [`MAX_TAB_WIDTH`](app_settings::MAX_TAB_WIDTH) spaces.
    pub fn indent(&self) -> String {
        " ".repeat(self.tab_width.min(app_settings::MAX_TAB_WIDTH))
    }
}
