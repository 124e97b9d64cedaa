// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard engine for Codeboard.
//!
//! This module contains the key interaction state machine and everything it
//! needs around it: the accent popup controller, key geometry, keyword
//! suggestions and the host contract.
//!
//! # Example Usage
//!
//! ```rust
//! use codeboard::engine::{BufferHost, KeyboardEngine};
//! use codeboard::input::ManualClock;
//! use codeboard::layout::builtin_skin;
//!
//! let skin = builtin_skin("ultimate").unwrap().into_value();
//! let clock = ManualClock::default();
//! let mut engine = KeyboardEngine::new(skin, BufferHost::default()).with_clock(clock.clone());
//!
//! for key in ["w", "h", "i", "l"] {
//!     engine.press(key);
//!     engine.release(key);
//! }
//! assert_eq!(engine.suggestions(), vec!["while"]);
//!
//! engine.apply_suggestion("while");
//! assert_eq!(engine.value(), "while ");
//! ```

// Sub-modules
pub mod geometry;
pub mod host;
pub mod popup;
pub mod state;
pub mod suggest;

// Re-export public API
pub use geometry::{GridGeometry, KeyGeometry, Rectangle};
pub use host::{BufferHost, KeyboardHost};
pub use popup::{AccentPopup, PopupAnchor, adjust_popup_anchor, calculate_popup_anchor};
pub use state::{CAPS_LOCK_LABEL, KeyboardEngine};
pub use suggest::{apply_suggestion, suggestions, trailing_token};

// ============================================================================
// Module Tests
// ============================================================================
