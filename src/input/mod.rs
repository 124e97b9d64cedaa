// SPDX-License-Identifier: GPL-3.0-only

//! Input handling module for Codeboard.
//!
//! This module turns raw input into the small vocabulary the engine works
//! with: classified key identifiers, layout/shift transitions, timestamps and
//! device-agnostic pointer events.
//!
//! # Features
//!
//! - **Key classification**: Split opaque key identifiers into control keys and printable text
//! - **Shift tracking**: One-shot shift, caps lock via double tap, symbols/letters switching
//! - **Clock abstraction**: Millisecond timestamps from a real or manually driven clock
//! - **Pointer events**: Mouse and touch adapters producing one `PointerEvent` type
//!
//! # Example Usage
//!
//! ```rust
//! use codeboard::config::EngineConfig;
//! use codeboard::input::{ControlKey, KeyKind, ShiftTracker, classify_key};
//! use codeboard::layout::LayoutMode;
//! use std::collections::HashMap;
//!
//! let aliases = HashMap::new();
//! assert_eq!(
//!     classify_key("{shift}", &aliases),
//!     KeyKind::Control(ControlKey::Shift)
//! );
//!
//! let mut shift = ShiftTracker::new(&EngineConfig::default());
//! shift.tap_shift(0);
//! assert_eq!(shift.layout(), LayoutMode::Shift);
//! ```

// Sub-modules
pub mod clock;
pub mod key;
pub mod pointer;
pub mod shift;

// Re-export public API
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use key::{ControlKey, KeyKind, classify_key, is_sentinel, resolve_alias_target};
pub use pointer::{
    MouseEvent, MouseKind, Point, PointerEvent, PointerPhase, TouchEvent, TouchKind,
};
pub use shift::{ShiftState, ShiftTracker};

// ============================================================================
// Module Tests
// ============================================================================
