// SPDX-License-Identifier: GPL-3.0-only

//! Gesture scripts.
//!
//! A script is a JSON list of input steps. It can be replayed against an
//! engine that runs on a [`ManualClock`], where `wait` steps move the clock
//! instead of sleeping, or fed live into a running [`KeyboardDriver`].
//!
//! ```json
//! [
//!   { "step": "press", "key": "(" },
//!   { "step": "wait", "ms": 600 },
//!   { "step": "pointer", "event": { "phase": "up", "position": { "x": 120, "y": 40 } } },
//!   { "step": "release", "key": "(" }
//! ]
//! ```
//!
//! [`KeyboardDriver`]: crate::driver::KeyboardDriver

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::driver::{DriverResult, InputEvent, KeyboardHandle};
use crate::engine::{KeyboardEngine, KeyboardHost};
use crate::input::{ManualClock, Millis, PointerEvent};
use crate::layout::{ParseError, ParseResult, ValidationIssue};

/// One step of a gesture script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Press a key.
    Press { key: String },
    /// Release a key.
    Release { key: String },
    /// Let time pass.
    Wait { ms: Millis },
    /// Deliver a pointer event.
    Pointer { event: PointerEvent },
    /// Click a suggestion.
    Suggest { word: String },
    /// Abort the current gesture.
    Reset,
}

impl ScriptStep {
    /// The driver event for this step, or `None` for `wait`.
    pub fn to_event(&self) -> Option<InputEvent> {
        match self {
            ScriptStep::Press { key } => Some(InputEvent::Press(key.clone())),
            ScriptStep::Release { key } => Some(InputEvent::Release(key.clone())),
            ScriptStep::Wait { .. } => None,
            ScriptStep::Pointer { event } => Some(InputEvent::Pointer(*event)),
            ScriptStep::Suggest { word } => Some(InputEvent::Suggestion(word.clone())),
            ScriptStep::Reset => Some(InputEvent::Reset),
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureScript {
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    /// Creates a script from steps.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Loads a script from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<ParseResult<Self>, ParseError> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        let json_str =
            fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, &display_path))?;
        let script: GestureScript = serde_json::from_str(&json_str)
            .map_err(|e| ParseError::json_error_with_path(e, &display_path))?;

        Ok(script.checked())
    }

    /// Loads a script from a JSON string.
    pub fn from_json(json: &str) -> Result<ParseResult<Self>, ParseError> {
        let script: GestureScript = serde_json::from_str(json).map_err(ParseError::json_error)?;
        Ok(script.checked())
    }

    /// Total time covered by `wait` steps.
    pub fn duration_ms(&self) -> Millis {
        self.steps
            .iter()
            .map(|step| match step {
                ScriptStep::Wait { ms } => *ms,
                _ => 0,
            })
            .sum()
    }

    /// Replays the script synchronously.
    ///
    /// `clock` must be the clock the engine was built with; each `wait`
    /// advances it and ticks the engine.
    pub fn replay<H: KeyboardHost>(&self, engine: &mut KeyboardEngine<H>, clock: &ManualClock) {
        for step in &self.steps {
            match step {
                ScriptStep::Press { key } => engine.press(key),
                ScriptStep::Release { key } => engine.release(key),
                ScriptStep::Wait { ms } => {
                    clock.advance(*ms);
                    engine.tick();
                }
                ScriptStep::Pointer { event } => engine.pointer(*event),
                ScriptStep::Suggest { word } => engine.apply_suggestion(word),
                ScriptStep::Reset => engine.reset(),
            }
        }
        tracing::debug!("Replayed {} script steps", self.steps.len());
    }

    /// Feeds the script into a running driver, sleeping for `wait` steps.
    pub async fn feed(&self, handle: &mut KeyboardHandle) -> DriverResult<()> {
        for step in &self.steps {
            match step.to_event() {
                Some(event) => handle.send(event).await?,
                None => {
                    if let ScriptStep::Wait { ms } = step {
                        tokio::time::sleep(Duration::from_millis(*ms)).await;
                    }
                }
            }
        }
        Ok(())
    }

    fn checked(self) -> ParseResult<Self> {
        let warnings = validate_steps(&self.steps);
        ParseResult::with_warnings(self, warnings)
    }
}

/// Checks a script for steps that cannot have the intended effect.
fn validate_steps(steps: &[ScriptStep]) -> Vec<ValidationIssue> {
    let mut warnings = Vec::new();
    if steps.is_empty() {
        warnings.push(ValidationIssue::warning("Script has no steps", "steps"));
        return warnings;
    }

    let mut held: HashSet<&str> = HashSet::new();
    for (i, step) in steps.iter().enumerate() {
        match step {
            ScriptStep::Press { key } => {
                held.insert(key.as_str());
            }
            ScriptStep::Release { key } => {
                if !held.remove(key.as_str()) {
                    warnings.push(
                        ValidationIssue::warning(
                            format!("Release of '{}' without a matching press", key),
                            format!("steps[{}]", i),
                        )
                        .with_suggestion("Releases without a press are ignored"),
                    );
                }
            }
            ScriptStep::Reset => held.clear(),
            _ => {}
        }
    }

    let mut still_held: Vec<&str> = held.into_iter().collect();
    still_held.sort_unstable();
    for key in still_held {
        warnings.push(ValidationIssue::warning(
            format!("Key '{}' is still held when the script ends", key),
            "steps",
        ));
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
