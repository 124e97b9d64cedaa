// SPDX-License-Identifier: GPL-3.0-only

//! Accent popup placement, tracking and resolution.
//!
//! When a key from the accent map is held past the hold threshold, its
//! alternatives are shown in a horizontal strip of option buttons above the
//! key. While the popup is visible every pointer move updates the provisional
//! selection (slide-to-select), and the pointer release resolves it:
//!
//! 1. the provisional selection, if any;
//! 2. otherwise the option under the release point;
//! 3. otherwise the held key's own character.

use crate::app_settings::POPUP_ADAPTIVE_NUDGE;
use crate::config::{EngineConfig, PopupAlignment};
use crate::engine::geometry::Rectangle;
use crate::input::Point;

/// Popup position relative to the keyboard container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopupAnchor {
    /// Left edge, relative to the container's left edge.
    pub left: f32,
    /// Top edge, relative to the container's top edge.
    pub top: f32,
}

impl PopupAnchor {
    /// Creates a new anchor.
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Computes where a popup with `option_count` options opens for a key.
///
/// Returns `None` if the key bounds are unknown, in which case the caller
/// falls back to a previous anchor. A missing container is treated as a
/// container at the viewport origin spanning the viewport width.
pub fn calculate_popup_anchor(
    config: &EngineConfig,
    key_bounds: Option<Rectangle>,
    container: Option<Rectangle>,
    viewport_width: f32,
    option_count: usize,
) -> Option<PopupAnchor> {
    let key = key_bounds?;
    let container =
        container.unwrap_or_else(|| Rectangle::new(0.0, 0.0, viewport_width, key.bottom()));

    let popup_width = option_count as f32 * config.accent_button_width;
    let relative_left = key.x - container.x;
    let relative_top = key.y - container.y;

    let left = match config.popup_alignment {
        PopupAlignment::RightEdge => relative_left + key.width - popup_width,
        PopupAlignment::Adaptive => {
            if relative_left + key.width / 2.0 < container.width / 2.0 {
                relative_left
            } else {
                relative_left + key.width - popup_width + POPUP_ADAPTIVE_NUDGE
            }
        }
    };

    let anchor = PopupAnchor::new(left, relative_top - config.popup_top_offset);
    Some(adjust_popup_anchor(
        anchor,
        container.x,
        popup_width,
        viewport_width,
    ))
}

/// Shifts a popup left by however much its right edge overflows the
/// viewport. Vertical position is never adjusted.
pub fn adjust_popup_anchor(
    mut anchor: PopupAnchor,
    container_x: f32,
    popup_width: f32,
    viewport_width: f32,
) -> PopupAnchor {
    let right = container_x + anchor.left + popup_width;
    if right > viewport_width {
        anchor.left -= right - viewport_width;
    }
    anchor
}

/// A visible accent popup.
#[derive(Debug, Clone, PartialEq)]
pub struct AccentPopup {
    owner: String,
    options: Vec<String>,
    anchor: PopupAnchor,
    origin: Point,
    button_width: f32,
    button_height: f32,
    selection: Option<usize>,
    last_position: Option<Point>,
}

impl AccentPopup {
    /// Creates a popup for `owner` with its options.
    ///
    /// `origin` is the container's top-left corner in viewport coordinates.
    pub fn new(
        owner: impl Into<String>,
        options: Vec<String>,
        anchor: PopupAnchor,
        origin: Point,
        config: &EngineConfig,
    ) -> Self {
        Self {
            owner: owner.into(),
            options,
            anchor,
            origin,
            button_width: config.accent_button_width,
            button_height: config.accent_button_height,
            selection: None,
            last_position: None,
        }
    }

    /// The key that opened the popup.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The options, in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The container-relative anchor.
    pub fn anchor(&self) -> PopupAnchor {
        self.anchor
    }

    /// The provisional selection index.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// The provisionally selected option.
    pub fn selected_option(&self) -> Option<&str> {
        self.selection
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Bounds of the whole popup in viewport coordinates.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            self.origin.x + self.anchor.left,
            self.origin.y + self.anchor.top,
            self.options.len() as f32 * self.button_width,
            self.button_height,
        )
    }

    /// Bounds of one option button in viewport coordinates.
    pub fn option_bounds(&self, index: usize) -> Option<Rectangle> {
        if index >= self.options.len() {
            return None;
        }
        let popup = self.bounds();
        Some(Rectangle::new(
            popup.x + index as f32 * self.button_width,
            popup.y,
            self.button_width,
            self.button_height,
        ))
    }

    /// Index of the option under a point.
    pub fn option_at(&self, point: Point) -> Option<usize> {
        (0..self.options.len()).find(|i| {
            self.option_bounds(*i)
                .is_some_and(|bounds| bounds.contains(point))
        })
    }

    /// Returns `true` if the point lies inside the popup.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Returns `true` if the last tracked pointer position is inside the
    /// popup.
    pub fn pointer_inside(&self) -> bool {
        self.last_position.is_some_and(|p| self.contains(p))
    }

    /// Updates the provisional selection from a pointer position.
    ///
    /// Moving outside the options clears the selection; moving back in
    /// re-arms it. An event without a position leaves the state untouched.
    pub fn track(&mut self, position: Option<Point>) {
        let Some(point) = position else {
            return;
        };
        self.last_position = Some(point);

        let selection = self.option_at(point);
        if selection != self.selection {
            tracing::debug!(
                "Accent selection for '{}': {:?}",
                self.owner,
                selection.and_then(|i| self.options.get(i))
            );
        }
        self.selection = selection;
    }

    /// Resolves the popup to the text that should be inserted.
    ///
    /// Falls back to the owner key when the pointer was released away from
    /// every option.
    pub fn resolve(&self, release_point: Option<Point>) -> String {
        if let Some(selected) = self.selected_option() {
            return selected.to_string();
        }

        release_point
            .or(self.last_position)
            .and_then(|p| self.option_at(p))
            .and_then(|i| self.options.get(i))
            .unwrap_or(&self.owner)
            .clone()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
