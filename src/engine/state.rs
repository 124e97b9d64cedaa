// SPDX-License-Identifier: GPL-3.0-only

//! Key interaction state machine.
//!
//! [`KeyboardEngine`] is the only place that turns input events into buffer
//! mutations and layout transitions. It owns all gesture state: the set of
//! pressed keys, their hold deadlines, the accent popup and the shift
//! tracker.
//!
//! Time never advances on its own. Hold timers are deadlines read from the
//! injected [`Clock`]; every entry point first fires the deadlines that are
//! due, and [`KeyboardEngine::tick`] does only that. A driver sleeps until
//! [`KeyboardEngine::next_deadline`] and then ticks.
//!
//! # Event Flow
//!
//! - `press`: control keys act immediately. Printable keys are recorded and,
//!   if they have accents, get a hold deadline and a precomputed popup anchor.
//! - hold deadline reached: the accent popup opens.
//! - `pointer`: while the popup is open, moves update the selection, a press
//!   outside dismisses it and the release resolves it.
//! - `release`: inserts the key text unless the popup is handling the gesture.
//!
//! No event ever fails. Unknown keys and unmatched releases are ignored.

use std::collections::HashMap;

use crate::config::{EngineConfig, ShiftMode};
use crate::engine::geometry::{GridGeometry, KeyGeometry};
use crate::engine::host::KeyboardHost;
use crate::engine::popup::{AccentPopup, PopupAnchor, calculate_popup_anchor};
use crate::engine::suggest;
use crate::input::{
    Clock, ControlKey, KeyKind, Millis, Point, PointerEvent, PointerPhase, ShiftState,
    ShiftTracker, SystemClock,
};
use crate::layout::{LayoutMode, Skin};

/// Label shown on the shift key while caps lock is on.
pub const CAPS_LOCK_LABEL: &str = "CAPS";

/// Gesture state for a key that is currently down.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PressedKey {
    /// When the hold threshold is reached, for keys with accents.
    hold_deadline: Option<Millis>,
    /// Where the popup opens if the hold threshold is reached.
    anchor: Option<PopupAnchor>,
}

/// The key interaction state machine.
pub struct KeyboardEngine<H: KeyboardHost> {
    skin: Skin,
    config: EngineConfig,
    host: H,
    clock: Box<dyn Clock>,
    geometry: Box<dyn KeyGeometry>,
    shift: ShiftTracker,
    pressed: HashMap<String, PressedKey>,
    last_key_pressed: Option<String>,
    popup: Option<AccentPopup>,
    last_anchor: Option<PopupAnchor>,
}

impl<H: KeyboardHost> KeyboardEngine<H> {
    /// Creates an engine for a skin, using the system clock and a grid
    /// layout of the skin at the default keyboard size.
    pub fn new(skin: Skin, host: H) -> Self {
        let config = skin.behavior.clone();
        let geometry = GridGeometry::with_default_size(&skin);
        Self {
            shift: ShiftTracker::new(&config),
            skin,
            config,
            host,
            clock: Box::new(SystemClock::new()),
            geometry: Box::new(geometry),
            pressed: HashMap::new(),
            last_key_pressed: None,
            popup: None,
            last_anchor: None,
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the key geometry.
    pub fn with_geometry(mut self, geometry: impl KeyGeometry + 'static) -> Self {
        self.geometry = Box::new(geometry);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the engine and returns the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The current buffer contents.
    pub fn value(&self) -> &str {
        self.host.value()
    }

    /// The active skin.
    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    /// The behavior configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active layout mode.
    pub fn layout_mode(&self) -> LayoutMode {
        self.shift.layout()
    }

    /// The current shift state.
    pub fn shift_state(&self) -> ShiftState {
        self.shift.state()
    }

    /// The key rows of the active layout.
    pub fn current_rows(&self) -> Vec<Vec<&str>> {
        self.skin.layout.keys(self.shift.layout())
    }

    /// The visible accent popup, if any.
    pub fn popup(&self) -> Option<&AccentPopup> {
        self.popup.as_ref()
    }

    /// Returns `true` if the key is currently tracked as down.
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains_key(key)
    }

    /// Number of keys currently tracked as down.
    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    /// The most recently pressed printable key.
    pub fn last_key_pressed(&self) -> Option<&str> {
        self.last_key_pressed.as_deref()
    }

    /// The label to draw on a key.
    ///
    /// Uses the skin's display table; the shift key reads
    /// [`CAPS_LOCK_LABEL`] while caps lock is on.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        if self.shift.is_locked()
            && self.config.shift_mode == ShiftMode::OneShot
            && self.skin.classify(key) == KeyKind::Control(ControlKey::Shift)
        {
            return CAPS_LOCK_LABEL;
        }
        self.skin.display_label(key)
    }

    /// Keyword suggestions for the current buffer.
    pub fn suggestions(&self) -> Vec<&str> {
        suggest::suggestions(
            self.host.value(),
            &self.skin.keywords,
            self.config.max_suggestions,
        )
    }

    /// The current time on the engine's clock.
    pub fn now_ms(&self) -> Millis {
        self.clock.now_ms()
    }

    /// The earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        if self.popup.is_some() {
            return None;
        }
        self.pressed.values().filter_map(|p| p.hold_deadline).min()
    }

    // ========================================================================
    // Input Events
    // ========================================================================

    /// Handles a key press.
    pub fn press(&mut self, key: &str) {
        let now = self.clock.now_ms();
        self.fire_due_timers(now);

        match self.skin.classify(key) {
            KeyKind::Unknown => {
                tracing::debug!("Ignoring press of unknown key '{}'", key);
            }
            KeyKind::Control(control) => {
                if self.popup.is_some() {
                    self.dismiss_popup("control key pressed");
                }
                self.apply_control(control, now);
            }
            KeyKind::Printable(_) => self.press_printable(key, now),
        }
    }

    fn press_printable(&mut self, key: &str, now: Millis) {
        if self.pressed.contains_key(key) {
            tracing::debug!("Ignoring repeated press of '{}'", key);
            return;
        }

        if self.popup.is_some() {
            self.dismiss_popup("another key pressed");
        }

        // Only the newest key can still become a long press
        for pressed in self.pressed.values_mut() {
            pressed.hold_deadline = None;
        }

        let option_count = self.skin.accents.options(key).map(<[String]>::len);
        let pressed = match option_count {
            Some(count) => PressedKey {
                hold_deadline: Some(now.saturating_add(self.config.hold_threshold_ms)),
                anchor: Some(self.anchor_for(key, count)),
            },
            None => PressedKey {
                hold_deadline: None,
                anchor: None,
            },
        };

        tracing::debug!(
            "Key '{}' pressed (hold deadline: {:?})",
            key,
            pressed.hold_deadline
        );
        self.pressed.insert(key.to_string(), pressed);
        self.last_key_pressed = Some(key.to_string());
    }

    /// Handles a key release.
    pub fn release(&mut self, key: &str) {
        let now = self.clock.now_ms();
        self.fire_due_timers(now);

        if !self.pressed.contains_key(key) {
            tracing::debug!("Ignoring release of '{}' without a tracked press", key);
            return;
        }

        if let Some(popup) = &self.popup
            && popup.owner() == key
        {
            if popup.pointer_inside() || popup.selection().is_some() {
                // The pointer release resolves the popup
                tracing::debug!("Release of '{}' deferred to the accent popup", key);
                return;
            }

            let text = popup.resolve(None);
            self.resolve_popup(text, now);
            return;
        }

        self.pressed.remove(key);
        if self.last_key_pressed.as_deref() == Some(key) {
            self.last_key_pressed = None;
        }
        self.insert_printable(key, now);
    }

    /// Handles a pointer event. Ignored unless an accent popup is visible.
    pub fn pointer(&mut self, event: PointerEvent) {
        let now = self.clock.now_ms();
        self.fire_due_timers(now);

        let Some(popup) = self.popup.as_mut() else {
            return;
        };

        match event.phase {
            PointerPhase::Down => {
                if event.position.is_some_and(|p| !popup.contains(p)) {
                    self.dismiss_popup("pointer down outside popup");
                } else {
                    popup.track(event.position);
                }
            }
            PointerPhase::Move => popup.track(event.position),
            PointerPhase::Up | PointerPhase::Cancel => {
                let text = popup.resolve(event.position);
                self.resolve_popup(text, now);
            }
        }
    }

    /// Replaces the trailing partial word with a suggestion.
    pub fn apply_suggestion(&mut self, word: &str) {
        let now = self.clock.now_ms();
        self.fire_due_timers(now);

        self.haptic();
        let value = suggest::apply_suggestion(self.host.value(), word);
        tracing::debug!("Applied suggestion '{}'", word);
        self.host.on_change(value);
    }

    /// Fires due timers. Returns `true` if an accent popup opened.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.fire_due_timers(now)
    }

    /// Clears all gesture state: pressed keys, pending holds and the popup.
    ///
    /// Does nothing when no gesture is in progress. The buffer and layout
    /// are kept.
    pub fn reset(&mut self) {
        if self.popup.is_some() {
            self.dismiss_popup("reset");
            return;
        }

        if !self.pressed.is_empty() || self.last_key_pressed.is_some() {
            tracing::debug!("Reset cleared {} pressed key(s)", self.pressed.len());
        }
        self.pressed.clear();
        self.last_key_pressed = None;
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn anchor_for(&mut self, key: &str, option_count: usize) -> PopupAnchor {
        let computed = calculate_popup_anchor(
            &self.config,
            self.geometry.key_bounds(self.shift.layout(), key),
            self.geometry.container_bounds(),
            self.geometry.viewport_width(),
            option_count,
        );

        match computed {
            Some(anchor) => {
                self.last_anchor = Some(anchor);
                anchor
            }
            None => {
                tracing::debug!("No bounds for '{}', using last known popup position", key);
                self.last_anchor.unwrap_or_default()
            }
        }
    }

    fn fire_due_timers(&mut self, now: Millis) -> bool {
        if self.popup.is_some() {
            return false;
        }

        let due = self
            .pressed
            .iter()
            .filter_map(|(key, p)| p.hold_deadline.filter(|d| *d <= now).map(|d| (d, key)))
            .min()
            .map(|(_, key)| key.clone());
        let Some(key) = due else {
            return false;
        };

        let Some(pressed) = self.pressed.get_mut(&key) else {
            return false;
        };
        pressed.hold_deadline = None;
        let anchor = pressed.anchor.unwrap_or_default();

        let Some(options) = self.skin.accents.options(&key) else {
            return false;
        };

        let origin = self
            .geometry
            .container_bounds()
            .map(|c| Point::new(c.x, c.y))
            .unwrap_or_default();
        let popup = AccentPopup::new(key, options.to_vec(), anchor, origin, &self.config);

        tracing::debug!(
            "Hold threshold reached for '{}': showing {} option(s)",
            popup.owner(),
            popup.options().len()
        );
        self.host.on_popup_shown(&popup);
        self.popup = Some(popup);
        true
    }

    fn hide_popup(&mut self) {
        if self.popup.take().is_some() {
            self.host.on_popup_hidden();
        }
        self.pressed.clear();
        self.last_key_pressed = None;
    }

    fn dismiss_popup(&mut self, reason: &str) {
        tracing::debug!("Accent popup dismissed: {}", reason);
        self.hide_popup();
    }

    fn resolve_popup(&mut self, text: String, now: Millis) {
        tracing::debug!("Accent popup resolved to '{}'", text);
        self.hide_popup();
        self.insert_printable(&text, now);
    }

    fn insert_printable(&mut self, text: &str, now: Millis) {
        self.haptic();
        self.append(text);

        if self.shift.printable_resolved(now) {
            self.host.on_layout_change(self.shift.layout());
        }
    }

    fn append(&mut self, text: &str) {
        let mut value = self.host.value().to_string();
        value.push_str(text);
        self.host.on_change(value);
    }

    fn apply_control(&mut self, control: ControlKey, now: Millis) {
        self.haptic();

        let layout_changed = match control {
            ControlKey::Shift => self.shift.tap_shift(now),
            ControlKey::Symbols => self.shift.switch_to_symbols(),
            ControlKey::Letters => self.shift.switch_to_letters(),
            ControlKey::Enter => {
                self.append("\n");
                false
            }
            ControlKey::Space => {
                self.append(" ");
                false
            }
            ControlKey::Tab => {
                let indent = self.config.indent();
                self.append(&indent);
                false
            }
            ControlKey::Backspace => {
                let mut value = self.host.value().to_string();
                if value.pop().is_some() {
                    self.host.on_change(value);
                }
                false
            }
        };

        if layout_changed {
            tracing::debug!("Layout changed to {}", self.shift.layout());
            self.host.on_layout_change(self.shift.layout());
        }
    }

    fn haptic(&mut self) {
        if self.config.haptic_pattern_ms > 0 {
            self.host.haptic(self.config.haptic_pattern_ms);
        }
    }
}

impl<H: KeyboardHost + std::fmt::Debug> std::fmt::Debug for KeyboardEngine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardEngine")
            .field("skin", &self.skin.name)
            .field("host", &self.host)
            .field("layout", &self.shift.layout())
            .field("shift", &self.shift.state())
            .field("pressed", &self.pressed.keys().collect::<Vec<_>>())
            .field("popup", &self.popup)
            .field("now_ms", &self.now_ms())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Rectangle;
    use crate::input::ManualClock;
    use crate::layout::builtin_skin;

    /// Host that records every callback.
    #[derive(Debug, Default)]
    struct RecordingHost {
        value: String,
        changes: usize,
        layouts: Vec<LayoutMode>,
        shown: usize,
        hidden: usize,
        haptics: usize,
    }

    impl KeyboardHost for RecordingHost {
        fn value(&self) -> &str {
            &self.value
        }

        fn on_change(&mut self, value: String) {
            self.value = value;
            self.changes += 1;
        }

        fn on_layout_change(&mut self, layout: LayoutMode) {
            self.layouts.push(layout);
        }

        fn on_popup_shown(&mut self, _popup: &AccentPopup) {
            self.shown += 1;
        }

        fn on_popup_hidden(&mut self) {
            self.hidden += 1;
        }

        fn haptic(&mut self, _pattern_ms: u32) {
            self.haptics += 1;
        }
    }

    /// Geometry that never knows where anything is.
    struct UnmeasuredGeometry;

    impl KeyGeometry for UnmeasuredGeometry {
        fn key_bounds(&self, _layout: LayoutMode, _key: &str) -> Option<Rectangle> {
            None
        }

        fn container_bounds(&self) -> Option<Rectangle> {
            None
        }

        fn viewport_width(&self) -> f32 {
            400.0
        }
    }

    fn engine_for(skin: &str) -> (KeyboardEngine<RecordingHost>, ManualClock) {
        let skin = builtin_skin(skin).unwrap().into_value();
        let clock = ManualClock::starting_at(10_000);
        let engine = KeyboardEngine::new(skin, RecordingHost::default()).with_clock(clock.clone());
        (engine, clock)
    }

    fn engine() -> (KeyboardEngine<RecordingHost>, ManualClock) {
        engine_for("ultimate")
    }

    fn tap(engine: &mut KeyboardEngine<RecordingHost>, key: &str) {
        engine.press(key);
        engine.release(key);
    }

    fn option_center(engine: &KeyboardEngine<RecordingHost>, index: usize) -> Point {
        engine
            .popup()
            .and_then(|p| p.option_bounds(index))
            .map(|b| b.center())
            .expect("popup option should exist")
    }

    fn hold(engine: &mut KeyboardEngine<RecordingHost>, clock: &ManualClock, key: &str) {
        engine.press(key);
        clock.advance(500);
        assert!(engine.tick(), "Holding '{}' should open the popup", key);
    }

    // ========================================================================
    // Taps
    // ========================================================================

    /// Test 1: Tapping a key without accents inserts its text
    #[test]
    fn test_tap_inserts_literal_text() {
        let (mut engine, _clock) = engine();

        tap(&mut engine, "q");
        tap(&mut engine, "{");
        assert_eq!(engine.value(), "q{");

        engine.press("{extra}");
        tap(&mut engine, "while");
        assert_eq!(engine.value(), "q{while", "Multi-character keys insert whole");
        assert_eq!(engine.pressed_count(), 0);
    }

    /// Test 2: Quick tap of an accent key inserts the base character
    #[test]
    fn test_accent_key_quick_tap_inserts_base() {
        let (mut engine, clock) = engine();

        engine.press("(");
        clock.advance(499);
        engine.release("(");

        assert_eq!(engine.value(), "(");
        assert!(engine.popup().is_none());
        assert_eq!(engine.host().shown, 0);
        assert_eq!(engine.next_deadline(), None);
    }

    /// Test 3: Double press suppression
    #[test]
    fn test_double_press_is_suppressed() {
        let (mut engine, clock) = engine();

        engine.press("(");
        let deadline = engine.next_deadline();
        clock.advance(100);
        engine.press("(");
        assert_eq!(engine.next_deadline(), deadline, "Second press must not restart the hold");
        engine.release("(");
        assert_eq!(engine.value(), "(");

        engine.press("q");
        engine.press("q");
        engine.release("q");
        engine.release("q");
        assert_eq!(engine.value(), "(q", "One press and one release insert once");
    }

    /// Test 4: Unknown keys and unmatched releases are ignored
    #[test]
    fn test_unknown_and_unmatched_events() {
        let (mut engine, _clock) = engine();

        tap(&mut engine, "{ghost}");
        tap(&mut engine, "");
        engine.release("q");

        assert_eq!(engine.value(), "");
        assert_eq!(engine.host().changes, 0);
        assert_eq!(engine.host().haptics, 0);
    }

    // ========================================================================
    // Control Keys
    // ========================================================================

    /// Test 5: Text-editing control keys
    #[test]
    fn test_editing_controls() {
        let (mut engine, _clock) = engine();

        tap(&mut engine, "{tab}");
        tap(&mut engine, "x");
        tap(&mut engine, "{space}");
        tap(&mut engine, "{enter}");
        assert_eq!(engine.value(), "    x \n", "Tab inserts spaces, not a tab");

        tap(&mut engine, "{bksp}");
        assert_eq!(engine.value(), "    x ");
    }

    /// Test 6: Backspace
    #[test]
    fn test_backspace() {
        let (mut engine, _clock) = engine_for("plain");

        tap(&mut engine, "{bksp}");
        assert_eq!(engine.value(), "", "Backspace on an empty buffer is harmless");
        assert_eq!(engine.host().changes, 0);

        tap(&mut engine, "æ");
        tap(&mut engine, "ø");
        tap(&mut engine, "{bksp}");
        assert_eq!(engine.value(), "æ", "Backspace removes one character");
    }

    /// Test 7: Symbols and letters switching
    #[test]
    fn test_layout_switching() {
        let (mut engine, clock) = engine();

        engine.press("{shift}");
        clock.advance(1_000);
        engine.press("{extra}");
        assert_eq!(engine.layout_mode(), LayoutMode::Extra);
        assert_eq!(engine.current_rows()[2], vec!["for", "while", "range", "return"]);

        engine.press("{shift}");
        assert_eq!(engine.layout_mode(), LayoutMode::Extra, "Shift does nothing on symbols");

        engine.press("{default}");
        assert_eq!(engine.layout_mode(), LayoutMode::Default, "Letters never lands on shift");

        assert_eq!(
            engine.host().layouts,
            vec![LayoutMode::Shift, LayoutMode::Extra, LayoutMode::Default]
        );
    }

    /// Test 8: Temporary shift reverts after one key
    #[test]
    fn test_temporary_shift_reverts() {
        let (mut engine, clock) = engine();

        engine.press("{shift}");
        engine.release("{shift}");
        assert_eq!(engine.layout_mode(), LayoutMode::Shift);
        assert_eq!(engine.shift_state(), ShiftState::Temporary);

        clock.advance(400);
        tap(&mut engine, "H");
        assert_eq!(engine.layout_mode(), LayoutMode::Default);
        assert_eq!(engine.shift_state(), ShiftState::Off);

        tap(&mut engine, "i");
        assert_eq!(engine.value(), "Hi");
    }

    /// Test 9: Quick double tap locks shift
    #[test]
    fn test_double_tap_locks_shift() {
        let (mut engine, clock) = engine();

        tap(&mut engine, "{shift}");
        clock.advance(200);
        tap(&mut engine, "{shift}");
        assert_eq!(engine.shift_state(), ShiftState::Locked);
        assert_eq!(engine.label_for("{shift}"), CAPS_LOCK_LABEL);

        for key in ["A", "B", "C"] {
            clock.advance(1_000);
            tap(&mut engine, key);
        }
        assert_eq!(engine.value(), "ABC");
        assert_eq!(engine.layout_mode(), LayoutMode::Shift, "Caps lock persists");

        clock.advance(1_000);
        tap(&mut engine, "{shift}");
        assert_eq!(engine.shift_state(), ShiftState::Off);
        assert_eq!(engine.label_for("{shift}"), "⇧");
    }

    /// Test 10: Toggle-mode skins never revert shift
    #[test]
    fn test_toggle_skin_keeps_shift() {
        let (mut engine, clock) = engine_for("naomi");

        tap(&mut engine, "{shift}");
        clock.advance(1_000);
        tap(&mut engine, "A");
        clock.advance(1_000);
        tap(&mut engine, "B");
        assert_eq!(engine.layout_mode(), LayoutMode::Shift);
    }

    /// Test 11: One-shot skin without a double-tap window reverts at once
    #[test]
    fn test_sofus_shift_reverts_immediately() {
        let (mut engine, _clock) = engine_for("sofus");

        tap(&mut engine, "{shift}");
        tap(&mut engine, "Q");
        assert_eq!(engine.layout_mode(), LayoutMode::Default);

        tap(&mut engine, "{123}");
        tap(&mut engine, "{ghost}");
        assert_eq!(engine.value(), "Q\n", "Aliased control acts as enter");
        assert_eq!(engine.layout_mode(), LayoutMode::Extra);
    }

    // ========================================================================
    // Accent Popup
    // ========================================================================

    /// Test 12: Hold then release over an option
    #[test]
    fn test_hold_and_release_over_option() {
        let (mut engine, clock) = engine();

        engine.press("{shift}");
        clock.advance(1_000);
        hold(&mut engine, &clock, "=");
        assert_eq!(engine.popup().map(|p| p.options().len()), Some(6));

        let target = option_center(&engine, 3);
        engine.pointer(PointerEvent::at(PointerPhase::Move, target.x, target.y));
        engine.pointer(PointerEvent::at(PointerPhase::Up, target.x, target.y));

        assert_eq!(engine.value(), "+=");
        assert!(engine.popup().is_none());

        // The key release that follows is ignored
        engine.release("=");
        assert_eq!(engine.value(), "+=");
        assert_eq!((engine.host().shown, engine.host().hidden), (1, 1));
    }

    /// Test 13: Hold, release the key first, then the pointer
    ///
    /// Either event order inserts exactly once.
    #[test]
    fn test_key_release_defers_to_popup() {
        let (mut engine, clock) = engine();

        hold(&mut engine, &clock, "r");
        let target = option_center(&engine, 1);
        engine.pointer(PointerEvent::at(PointerPhase::Move, target.x, target.y));

        engine.release("r");
        assert_eq!(engine.value(), "", "Release over the popup must not insert");
        assert!(engine.popup().is_some());

        engine.pointer(PointerEvent::at(PointerPhase::Up, target.x, target.y));
        assert_eq!(engine.value(), "return");
        assert_eq!(engine.host().changes, 1);
    }

    /// Test 14: Dragging away from the options takes the plain key
    #[test]
    fn test_drag_away_inserts_base_key() {
        let (mut engine, clock) = engine();

        hold(&mut engine, &clock, "p");
        let target = option_center(&engine, 0);
        engine.pointer(PointerEvent::at(PointerPhase::Move, target.x, target.y));
        engine.pointer(PointerEvent::at(PointerPhase::Move, target.x, target.y + 500.0));
        assert_eq!(engine.popup().and_then(|p| p.selection()), None);

        engine.release("p");
        assert_eq!(engine.value(), "p");
        assert!(engine.popup().is_none());

        engine.pointer(PointerEvent::at(PointerPhase::Up, target.x, target.y + 500.0));
        assert_eq!(engine.value(), "p", "Late pointer release is ignored");
    }

    /// Test 15: Touch release without moves resolves by position
    #[test]
    fn test_release_point_resolves_without_moves() {
        let (mut engine, clock) = engine();

        hold(&mut engine, &clock, ".");
        let target = option_center(&engine, 0);
        engine.pointer(PointerEvent::at(PointerPhase::Up, target.x, target.y));
        assert_eq!(engine.value(), ":");
    }

    /// Test 16: Outside click dismisses without inserting
    #[test]
    fn test_outside_click_dismisses() {
        let (mut engine, clock) = engine();

        hold(&mut engine, &clock, "(");
        engine.pointer(PointerEvent::at(PointerPhase::Down, 5_000.0, 5_000.0));

        assert!(engine.popup().is_none());
        assert_eq!(engine.value(), "");
        assert_eq!(engine.pressed_count(), 0);
        assert_eq!((engine.host().shown, engine.host().hidden), (1, 1));

        engine.release("(");
        assert_eq!(engine.value(), "", "Release after dismissal is ignored");
    }

    /// Test 17: Pointer events without a popup are ignored
    #[test]
    fn test_pointer_without_popup() {
        let (mut engine, _clock) = engine();

        engine.press("(");
        engine.pointer(PointerEvent::at(PointerPhase::Up, 0.0, 0.0));
        assert!(engine.is_pressed("("));
        engine.release("(");
        assert_eq!(engine.value(), "(");
    }

    /// Test 18: A new key press cancels a pending hold
    #[test]
    fn test_new_press_cancels_pending_hold() {
        let (mut engine, clock) = engine();

        engine.press("(");
        clock.advance(300);
        engine.press("q");
        clock.advance(300);
        assert!(!engine.tick(), "Cancelled hold must not fire");

        engine.release("q");
        engine.release("(");
        assert_eq!(engine.value(), "q(");
    }

    /// Test 19: Unknown bounds fall back to the last known anchor
    #[test]
    fn test_unknown_bounds_fall_back() {
        let skin = builtin_skin("ultimate").unwrap().into_value();
        let clock = ManualClock::default();
        let mut engine = KeyboardEngine::new(skin, RecordingHost::default())
            .with_clock(clock.clone())
            .with_geometry(UnmeasuredGeometry);

        hold(&mut engine, &clock, "(");
        assert_eq!(engine.popup().map(|p| p.anchor()), Some(PopupAnchor::default()));

        // Resolution still works, falling back to the base key
        engine.pointer(PointerEvent::without_position(PointerPhase::Cancel));
        assert_eq!(engine.value(), "(");
    }

    /// Test 20: Popup anchor is right-aligned with the held key
    #[test]
    fn test_popup_anchor_from_grid() {
        let (mut engine, clock) = engine();
        let grid = GridGeometry::with_default_size(engine.skin());
        let key = grid.key_bounds(LayoutMode::Default, "(").unwrap();

        hold(&mut engine, &clock, "(");
        let bounds = engine.popup().unwrap().bounds();
        assert!((bounds.right() - key.right()).abs() < 0.01);
        assert!((bounds.y - (key.y - 95.0)).abs() < 0.01);
    }

    // ========================================================================
    // Reset, Timers and Suggestions
    // ========================================================================

    /// Test 21: Reset wins and is idempotent
    #[test]
    fn test_reset() {
        let (mut engine, clock) = engine();

        engine.reset();
        assert_eq!(engine.host().hidden, 0, "Reset with nothing active is a no-op");

        engine.press("(");
        engine.reset();
        clock.advance(1_000);
        assert!(!engine.tick(), "Reset cancels pending holds");
        engine.release("(");
        assert_eq!(engine.value(), "");

        hold(&mut engine, &clock, "(");
        engine.reset();
        engine.reset();
        assert!(engine.popup().is_none());
        assert_eq!((engine.host().shown, engine.host().hidden), (1, 1));
    }

    /// Test 22: Next deadline
    #[test]
    fn test_next_deadline() {
        let (mut engine, clock) = engine();
        assert_eq!(engine.next_deadline(), None);

        engine.press("q");
        assert_eq!(engine.next_deadline(), None, "Keys without accents have no timer");

        engine.press("(");
        assert_eq!(engine.next_deadline(), Some(clock.now_ms() + 500));

        clock.advance(500);
        engine.tick();
        assert_eq!(engine.next_deadline(), None);
    }

    /// Test 23: Suggestions
    #[test]
    fn test_suggestions() {
        let (mut engine, _clock) = engine();

        for key in ["w", "h", "i", "l"] {
            tap(&mut engine, key);
        }
        assert_eq!(engine.suggestions(), vec!["while"]);

        engine.apply_suggestion("while");
        assert_eq!(engine.value(), "while ");
        assert!(engine.suggestions().is_empty());
    }

    /// Test 24: Haptic feedback on keystrokes
    #[test]
    fn test_haptics() {
        let (mut engine, _clock) = engine();

        tap(&mut engine, "a");
        tap(&mut engine, "{space}");
        engine.apply_suggestion("and");
        assert_eq!(engine.host().haptics, 3);
    }

    /// Test 25: An enormous hold threshold never fires and never overflows
    #[test]
    fn test_huge_hold_threshold() {
        let mut skin = builtin_skin("ultimate").unwrap().into_value();
        skin.behavior.hold_threshold_ms = u64::MAX;
        let clock = ManualClock::starting_at(10_000);
        let mut engine = KeyboardEngine::new(skin, RecordingHost::default()).with_clock(clock.clone());

        engine.press("(");
        assert_eq!(engine.next_deadline(), Some(u64::MAX), "Deadline should saturate");

        clock.advance(1_000_000);
        assert!(!engine.tick(), "Saturated deadline should not fire");
        engine.release("(");
        assert_eq!(engine.value(), "(");
    }

    /// Test 26: A key typed exactly at the double-tap window keeps shift
    #[test]
    fn test_shift_kept_at_window_boundary() {
        let (mut engine, clock) = engine();

        tap(&mut engine, "{shift}");
        clock.advance(300);
        tap(&mut engine, "H");
        assert_eq!(
            engine.layout_mode(),
            LayoutMode::Shift,
            "A key at exactly the window should stay shifted"
        );

        clock.advance(1);
        tap(&mut engine, "I");
        assert_eq!(engine.layout_mode(), LayoutMode::Default);
        assert_eq!(engine.value(), "HI");
    }

    /// Test 27: Toggle skins report shift as locked without the caps label
    #[test]
    fn test_toggle_skin_shift_state() {
        let (mut engine, _clock) = engine_for("gustav");

        tap(&mut engine, "{shift}");
        assert_eq!(engine.shift_state(), ShiftState::Locked);
        assert_ne!(engine.label_for("{shift}"), CAPS_LOCK_LABEL);

        tap(&mut engine, "{shift}");
        assert_eq!(engine.shift_state(), ShiftState::Off);
        assert_eq!(engine.layout_mode(), LayoutMode::Default);
    }

    /// Test 28: Skins with shift disabled ignore the shift key
    #[test]
    fn test_plain_skin_ignores_shift() {
        let (mut engine, _clock) = engine_for("plain");

        tap(&mut engine, "{shift}");
        assert_eq!(engine.layout_mode(), LayoutMode::Default);
        assert_eq!(engine.shift_state(), ShiftState::Off);
        assert!(engine.host().layouts.is_empty(), "No layout change should be reported");
    }
}
