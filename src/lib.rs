// SPDX-License-Identifier: GPL-3.0-only

//! Codeboard - A touch keyboard for entering Python code
//!
//! This crate provides the input logic of an on-screen keyboard tuned for
//! writing code: key presses, long-press accent popups, shift and caps lock,
//! symbol layouts and keyword suggestions. It owns no text of its own; a host
//! hands it the buffer and receives every change.
//!
//! # Architecture
//!
//! The crate consists of three layers:
//!
//! 1. **Skins** (`layout`): declarative layout tables, accent maps and
//!    keyword dictionaries, loaded from JSON and validated permissively.
//!
//! 2. **Engine** (`engine`, `input`): a single state machine that turns key
//!    and pointer events into buffer changes. Time comes from an injected
//!    clock, so timers are deadlines rather than callbacks.
//!
//! 3. **Driver** (`driver`, `script`): an async loop that feeds the engine
//!    from a channel and wakes it for hold deadlines, plus JSON gesture scripts
//!    that exercise it.
//!
//! # Modules
//!
//! - `app_settings`: Centralized application constants
//! - `config`: Behavior configuration embedded in each skin
//! - `driver`: Channel-fed event loop around the engine
//! - `engine`: Key interaction state machine, accent popup, suggestions
//! - `input`: Key classification, shift tracking, clocks, pointer events
//! - `layout`: Skin types, parsing, validation and built-in skins
//! - `script`: Gesture scripts for replay and live feeding

pub mod app_settings;
pub mod config;
pub mod driver;
pub mod engine;
pub mod input;
pub mod layout;
pub mod script;

// ============================================================================
// Integration Tests
// ============================================================================
