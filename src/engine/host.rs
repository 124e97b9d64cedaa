// SPDX-License-Identifier: GPL-3.0-only

//! Host contract.
//!
//! The keyboard never owns the text. The host (an editor pane, a test, the
//! script runner) hands it the current value and receives every new value
//! through [`KeyboardHost::on_change`].

use crate::engine::popup::AccentPopup;
use crate::layout::LayoutMode;

/// Callbacks from the keyboard engine to whatever hosts it.
pub trait KeyboardHost: Send {
    /// The current buffer contents.
    fn value(&self) -> &str;

    /// Called with the complete new buffer after every mutation.
    fn on_change(&mut self, value: String);

    /// Called when the active layout changes.
    fn on_layout_change(&mut self, _layout: LayoutMode) {}

    /// Called when an accent popup opens. Pointer tracking should start here.
    fn on_popup_shown(&mut self, _popup: &AccentPopup) {}

    /// Called exactly once for every [`on_popup_shown`](Self::on_popup_shown).
    /// Pointer tracking should stop here.
    fn on_popup_hidden(&mut self) {}

    /// Requests a short vibration.
    fn haptic(&mut self, _pattern_ms: u32) {}
}

/// A host that just keeps the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferHost {
    value: String,
}

impl BufferHost {
    /// Creates a host with initial contents.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Consumes the host and returns the buffer.
    pub fn into_value(self) -> String {
        self.value
    }
}

impl KeyboardHost for BufferHost {
    fn value(&self) -> &str {
        &self.value
    }

    fn on_change(&mut self, value: String) {
        self.value = value;
    }
}
