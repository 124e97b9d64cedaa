// SPDX-License-Identifier: GPL-3.0-only

//! Shift and layout-mode tracking.
//!
//! [`ShiftTracker`] owns the active [`LayoutMode`] together with the
//! [`ShiftState`], and applies the shift, symbols and letters control keys.
//!
//! In [`ShiftMode::OneShot`] a single shift tap shifts the next printable key,
//! and a second tap inside the double-tap window locks shift on (caps lock).
//! In [`ShiftMode::Toggle`] shift simply flips between the two letter layouts,
//! and the shifted layout is reported as [`ShiftState::Locked`].
//! In [`ShiftMode::Disabled`] shift keys are ignored.

use crate::config::{EngineConfig, ShiftMode};
use crate::input::clock::Millis;
use crate::layout::LayoutMode;

/// Shift state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftState {
    /// Shift is not active.
    #[default]
    Off,
    /// Shift applies to the next printable key only.
    Temporary,
    /// Shift persists until tapped again.
    Locked,
}

/// Tracks the active layout and shift state.
#[derive(Debug, Clone)]
pub struct ShiftTracker {
    mode: ShiftMode,
    double_tap_window_ms: Millis,
    layout: LayoutMode,
    state: ShiftState,
    last_shift_tap: Option<Millis>,
}

impl ShiftTracker {
    /// Creates a tracker on the default layout.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            mode: config.shift_mode,
            double_tap_window_ms: config.double_tap_window_ms,
            layout: LayoutMode::Default,
            state: ShiftState::Off,
            last_shift_tap: None,
        }
    }

    /// The active layout mode.
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// The current shift state.
    pub fn state(&self) -> ShiftState {
        self.state
    }

    /// Returns `true` while caps lock is on.
    pub fn is_locked(&self) -> bool {
        self.state == ShiftState::Locked
    }

    fn set(&mut self, layout: LayoutMode, state: ShiftState) -> bool {
        let changed = self.layout != layout;
        self.layout = layout;
        self.state = state;
        changed
    }

    /// Applies a shift tap. Returns `true` if the layout changed.
    ///
    /// Shift has no effect on the symbols layout.
    pub fn tap_shift(&mut self, now: Millis) -> bool {
        if self.mode == ShiftMode::Disabled {
            tracing::debug!("Shift ignored: disabled by skin");
            return false;
        }
        if self.layout == LayoutMode::Extra {
            tracing::debug!("Shift ignored on symbols layout");
            return false;
        }

        let double_tap = self
            .last_shift_tap
            .is_some_and(|last| now.saturating_sub(last) < self.double_tap_window_ms);
        self.last_shift_tap = Some(now);

        let changed = match (self.mode, self.state) {
            (ShiftMode::OneShot, ShiftState::Locked) => {
                self.set(LayoutMode::Default, ShiftState::Off)
            }
            (ShiftMode::OneShot, _) if double_tap => {
                self.set(LayoutMode::Shift, ShiftState::Locked)
            }
            (ShiftMode::Toggle, _) => match self.layout {
                LayoutMode::Shift => self.set(LayoutMode::Default, ShiftState::Off),
                _ => self.set(LayoutMode::Shift, ShiftState::Locked),
            },
            _ => match self.layout {
                LayoutMode::Shift => self.set(LayoutMode::Default, ShiftState::Off),
                _ => self.set(LayoutMode::Shift, ShiftState::Temporary),
            },
        };

        tracing::debug!(
            "Shift tap (double: {}): layout={}, state={:?}",
            double_tap,
            self.layout,
            self.state
        );
        changed
    }

    /// Called after a printable key resolves. Reverts a temporary shift
    /// unless the key came within the double-tap window of the last shift
    /// tap (boundary included). A zero window always reverts. Returns `true`
    /// if the layout changed.
    pub fn printable_resolved(&mut self, now: Millis) -> bool {
        if self.mode != ShiftMode::OneShot
            || self.state != ShiftState::Temporary
            || self.layout != LayoutMode::Shift
        {
            return false;
        }

        let within_window = self.double_tap_window_ms > 0
            && self
                .last_shift_tap
                .is_some_and(|last| now.saturating_sub(last) <= self.double_tap_window_ms);
        if within_window {
            return false;
        }

        tracing::debug!("Temporary shift reverted after printable key");
        self.set(LayoutMode::Default, ShiftState::Off)
    }

    /// Switches to the symbols layout. Returns `true` if the layout changed.
    pub fn switch_to_symbols(&mut self) -> bool {
        if self.layout == LayoutMode::Extra {
            return false;
        }
        self.set(LayoutMode::Extra, ShiftState::Off)
    }

    /// Leaves the symbols layout, always landing on the lowercase layout.
    /// Returns `true` if the layout changed.
    pub fn switch_to_letters(&mut self) -> bool {
        if self.layout != LayoutMode::Extra {
            return false;
        }
        self.set(LayoutMode::Default, ShiftState::Off)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
