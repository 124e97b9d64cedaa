// SPDX-License-Identifier: GPL-3.0-only

//! Unified pointer events.
//!
//! Mouse and touch input are reduced to a single [`PointerEvent`] before they
//! reach the engine, so the accent popup logic never cares which device the
//! gesture came from. Each concrete source has its own adapter:
//!
//! - [`MouseEvent`] maps one-to-one.
//! - [`TouchEvent`] reads the first active touch for start/move and the first
//!   changed touch for end/cancel (an ending touch is no longer active).

use serde::{Deserialize, Serialize};

/// A position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Pointer or finger went down.
    Down,
    /// Pointer or finger moved.
    Move,
    /// Pointer or finger lifted.
    Up,
    /// The platform cancelled the gesture. Resolved like `Up`.
    Cancel,
}

/// A device-agnostic pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Where the event happened, if the source reported a position.
    #[serde(default)]
    pub position: Option<Point>,
    /// The gesture phase.
    pub phase: PointerPhase,
}

impl PointerEvent {
    /// Creates an event at a position.
    pub fn at(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            position: Some(Point::new(x, y)),
            phase,
        }
    }

    /// Creates an event without a position.
    pub fn without_position(phase: PointerPhase) -> Self {
        Self {
            position: None,
            phase,
        }
    }

    /// Returns `true` for phases that end a gesture.
    pub fn is_end(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}

// ============================================================================
// Source Adapters
// ============================================================================

/// Mouse event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    /// Button pressed.
    Down,
    /// Cursor moved.
    Move,
    /// Button released.
    Up,
}

/// A raw mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Event kind.
    pub kind: MouseKind,
    /// Cursor X in viewport coordinates.
    pub client_x: f32,
    /// Cursor Y in viewport coordinates.
    pub client_y: f32,
}

impl From<MouseEvent> for PointerEvent {
    fn from(event: MouseEvent) -> Self {
        let phase = match event.kind {
            MouseKind::Down => PointerPhase::Down,
            MouseKind::Move => PointerPhase::Move,
            MouseKind::Up => PointerPhase::Up,
        };
        PointerEvent::at(phase, event.client_x, event.client_y)
    }
}

/// Touch event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    /// A finger touched the surface.
    Start,
    /// A finger moved.
    Move,
    /// A finger lifted.
    End,
    /// The platform cancelled the touch.
    Cancel,
}

/// A raw touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// Event kind.
    pub kind: TouchKind,
    /// Touches currently on the surface.
    pub touches: Vec<Point>,
    /// Touches that changed in this event.
    pub changed_touches: Vec<Point>,
}

impl From<TouchEvent> for PointerEvent {
    fn from(event: TouchEvent) -> Self {
        let (phase, position) = match event.kind {
            TouchKind::Start => (
                PointerPhase::Down,
                event
                    .touches
                    .first()
                    .or_else(|| event.changed_touches.first())
                    .copied(),
            ),
            TouchKind::Move => (PointerPhase::Move, event.touches.first().copied()),
            TouchKind::End => (PointerPhase::Up, event.changed_touches.first().copied()),
            TouchKind::Cancel => (
                PointerPhase::Cancel,
                event.changed_touches.first().copied(),
            ),
        };
        PointerEvent { position, phase }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
