// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Skin loaded when none is requested.
pub const DEFAULT_SKIN: &str = "ultimate";

/// How long a key must be held before its accent popup opens, in milliseconds.
pub const HOLD_THRESHOLD_MS: u64 = 500;

/// Longest hold threshold a skin may ask for before validation warns, in milliseconds.
pub const MAX_HOLD_THRESHOLD_MS: u64 = 10_000;

/// Two shift taps closer than this promote shift to caps lock, in milliseconds.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Number of spaces inserted by the tab key.
pub const TAB_WIDTH: usize = 4;

/// Widest indent the tab key inserts, whatever the skin asks for.
pub const MAX_TAB_WIDTH: usize = 16;

/// Maximum number of keyword suggestions offered at once.
pub const MAX_SUGGESTIONS: usize = 8;

/// Default keyboard width used by the grid geometry, in pixels.
pub const DEFAULT_KEYBOARD_WIDTH: f32 = 400.0;

/// Default keyboard height used by the grid geometry, in pixels.
pub const DEFAULT_KEYBOARD_HEIGHT: f32 = 250.0;

/// Width of a single option button in the accent popup, in pixels.
pub const ACCENT_BUTTON_WIDTH: f32 = 40.0;

/// Height of the accent popup, in pixels.
pub const ACCENT_BUTTON_HEIGHT: f32 = 48.0;

/// Distance between the popup top and the held key top, in pixels.
pub const POPUP_TOP_OFFSET: f32 = 95.0;

/// Extra horizontal nudge applied to right-aligned popups in adaptive alignment.
pub const POPUP_ADAPTIVE_NUDGE: f32 = 10.0;

/// Vibration pattern sent to the host on every keystroke, in milliseconds.
pub const HAPTIC_PATTERN_MS: u32 = 20;

/// Interval of the driver's fallback timer tick, in milliseconds.
///
/// The driver sleeps until the engine's next deadline or for this long,
/// whichever comes first.
pub const TIMER_TICK_INTERVAL_MS: u64 = 50;

/// Capacity of the input event channel used by the driver.
pub const INPUT_CHANNEL_CAPACITY: usize = 64;
