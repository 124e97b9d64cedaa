// SPDX-License-Identifier: GPL-3.0-only

//! Async event loop around the keyboard engine.
//!
//! Input arrives on a channel from however many sources the frontend has
//! (pointer handlers, touch handlers, the suggestion bar); the driver
//! serializes them into the single engine it owns, and sleeps until the next
//! hold deadline in between so popups open without any input.
//!
//! ```text
//! frontend ──InputEvent──▶ mpsc ──▶ KeyboardDriver ──▶ KeyboardEngine ──▶ KeyboardHost
//!                                        ▲
//!                                 sleep until next deadline
//! ```

use std::time::Duration;

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};

use crate::app_settings::{INPUT_CHANNEL_CAPACITY, TIMER_TICK_INTERVAL_MS};
use crate::engine::{KeyboardEngine, KeyboardHost};
use crate::input::PointerEvent;

/// Events that can be sent to the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down.
    Press(String),
    /// A key went up.
    Release(String),
    /// A pointer event from anywhere on screen.
    Pointer(PointerEvent),
    /// A suggestion was clicked.
    Suggestion(String),
    /// Abort the current gesture.
    Reset,
    /// Fire due timers now.
    Tick,
    /// Stop the driver.
    Shutdown,
}

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur while talking to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The driver has stopped and no longer accepts events.
    Closed,
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Closed => write!(f, "Keyboard driver is no longer running"),
        }
    }
}

impl std::error::Error for DriverError {}

/// Sending side of the driver's input channel.
#[derive(Debug, Clone)]
pub struct KeyboardHandle {
    tx: mpsc::Sender<InputEvent>,
}

impl KeyboardHandle {
    /// Sends an event to the driver.
    pub async fn send(&mut self, event: InputEvent) -> DriverResult<()> {
        self.tx.send(event).await.map_err(|e| {
            tracing::warn!("Dropped input event: {}", e);
            DriverError::Closed
        })
    }

    /// Sends a key press.
    pub async fn press(&mut self, key: impl Into<String>) -> DriverResult<()> {
        self.send(InputEvent::Press(key.into())).await
    }

    /// Sends a key release.
    pub async fn release(&mut self, key: impl Into<String>) -> DriverResult<()> {
        self.send(InputEvent::Release(key.into())).await
    }

    /// Sends a pointer event.
    pub async fn pointer(&mut self, event: PointerEvent) -> DriverResult<()> {
        self.send(InputEvent::Pointer(event)).await
    }

    /// Asks the driver to stop.
    pub async fn shutdown(&mut self) -> DriverResult<()> {
        self.send(InputEvent::Shutdown).await
    }
}

/// Owns a keyboard engine and feeds it from a channel.
pub struct KeyboardDriver<H: KeyboardHost> {
    engine: KeyboardEngine<H>,
    rx: mpsc::Receiver<InputEvent>,
}

impl<H: KeyboardHost> KeyboardDriver<H> {
    /// Creates a driver and the handle used to feed it.
    pub fn new(engine: KeyboardEngine<H>) -> (Self, KeyboardHandle) {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        (Self { engine, rx }, KeyboardHandle { tx })
    }

    /// The engine.
    pub fn engine(&self) -> &KeyboardEngine<H> {
        &self.engine
    }

    /// Runs until a shutdown event arrives or every handle is dropped, then
    /// returns the engine.
    pub async fn run(mut self) -> KeyboardEngine<H> {
        tracing::info!("Keyboard driver started");

        loop {
            let wait = Duration::from_millis(self.next_wait_ms());

            tokio::select! {
                event = self.rx.next() => match event {
                    Some(InputEvent::Shutdown) | None => break,
                    Some(event) => self.handle(event),
                },
                _ = tokio::time::sleep(wait) => {
                    self.engine.tick();
                }
            }
        }

        self.engine.reset();
        tracing::info!("Keyboard driver stopped");
        self.engine
    }

    /// Milliseconds until the next hold deadline, capped at the tick interval.
    fn next_wait_ms(&self) -> u64 {
        match self.engine.next_deadline() {
            Some(deadline) => deadline
                .saturating_sub(self.engine.now_ms())
                .min(TIMER_TICK_INTERVAL_MS),
            None => TIMER_TICK_INTERVAL_MS,
        }
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(key) => self.engine.press(&key),
            InputEvent::Release(key) => self.engine.release(&key),
            InputEvent::Pointer(pointer) => self.engine.pointer(pointer),
            InputEvent::Suggestion(word) => self.engine.apply_suggestion(&word),
            InputEvent::Reset => self.engine.reset(),
            InputEvent::Tick => {
                self.engine.tick();
            }
            InputEvent::Shutdown => {}
        }
    }
}
