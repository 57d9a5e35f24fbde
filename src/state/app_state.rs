//! Application state and transitions.
//!
//! AppState is the root view-model handed to the rendering layer.
//! All transitions are synchronous methods with no I/O; the one side effect
//! (starting an explanation request) is returned to the shell as an [`Effect`].

use super::display::DisplayState;
use super::explanation::{ExplanationRequest, ExplanationState, RequestId};
use crate::model::{HistoryLog, KeyAction, Mode, Theme};
use crate::parser;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;

/// Work the shell has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond re-rendering.
    None,
    /// Hand this request to the explanation worker.
    Explain(ExplanationRequest),
    /// Leave the event loop.
    Quit,
}

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Mode**: Standard → Scientific → AI → Standard (via `CycleMode`), or
///   direct selection. Initial state is Standard; no state is terminal.
/// - **Display**: operand/pending transitions, see [`DisplayState`].
/// - **Explanation**: idle → loading → idle, see [`ExplanationState`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    display: DisplayState,
    history: HistoryLog,
    explanation: ExplanationState,

    /// Which body panel is visible.
    pub mode: Mode,

    /// Cosmetic colour theme.
    pub theme: Theme,

    /// Highlighted history row (0 = newest). `None` until the user navigates.
    history_cursor: Option<usize>,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
}

impl AppState {
    /// Fresh state: `0` on the display, empty history, Standard mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator display.
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Past evaluations, newest first.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Explanation panel state.
    pub fn explanation(&self) -> &ExplanationState {
        &self.explanation
    }

    /// Highlighted history row, if the user has moved the cursor.
    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    /// Apply one user action.
    pub fn dispatch(&mut self, action: KeyAction) -> Effect {
        debug!(?action, "Dispatching action");

        if action.is_keypad() {
            self.display.dismiss_error();
        }

        match action {
            KeyAction::Digit(d) => self.display.append_digit(d),
            KeyAction::Operator(op) => self.display.apply_operator(op),
            KeyAction::Evaluate => self.evaluate(),
            KeyAction::Backspace => self.display.backspace(),
            KeyAction::Clear => self.display.clear(),
            KeyAction::SelectMode(mode) => self.mode = mode,
            KeyAction::CycleMode => self.mode = self.mode.next(),
            KeyAction::RequestExplanation => {
                if let Some(request) = self.request_explanation() {
                    return Effect::Explain(request);
                }
            }
            KeyAction::HistoryUp => self.move_history_cursor(-1),
            KeyAction::HistoryDown => self.move_history_cursor(1),
            KeyAction::SelectHistory => {
                if let Some(index) = self.history_cursor {
                    self.select_history(index);
                }
            }
            KeyAction::SelectHistoryAt(index) => {
                self.history_cursor = Some(index);
                self.select_history(index);
            }
            KeyAction::ToggleTheme => self.theme = self.theme.toggled(),
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::Quit => return Effect::Quit,
        }

        Effect::None
    }

    /// Evaluate `pending + operand`.
    ///
    /// Success records a history entry and shows the result; failure shows the
    /// error marker and records nothing.
    pub fn evaluate(&mut self) {
        let expression = self.display.full_expression();
        match parser::evaluate(&expression) {
            Ok(result) => {
                info!(%expression, %result, "Evaluated");
                self.history.record(expression, result.clone());
                self.display.show_result(result);
                self.history_cursor = None;
            }
            Err(error) => {
                warn!(%expression, %error, "Evaluation failed");
                self.display.show_error(error);
            }
        }
    }

    /// Republish the result of history entry `index` into the display.
    ///
    /// Out-of-range indices are ignored. History order is never changed.
    pub fn select_history(&mut self, index: usize) {
        let Some(result) = self.history.select(index).map(|e| e.result().to_string()) else {
            return;
        };
        debug!(index, %result, "History entry selected");
        self.display.load_result(result);
    }

    /// Start an explanation request for the current expression.
    ///
    /// Switches to the AI panel when a request actually starts.
    pub fn request_explanation(&mut self) -> Option<ExplanationRequest> {
        let query = self.display.explanation_query();
        let request = self.explanation.request(&query)?;
        self.mode = Mode::Ai;
        Some(request)
    }

    /// Deliver a finished explanation. Stale ids are ignored.
    pub fn complete_explanation(&mut self, id: RequestId, text: impl Into<String>) -> bool {
        self.explanation.complete(id, text)
    }

    fn move_history_cursor(&mut self, delta: isize) {
        let len = self.history.len();
        if len == 0 {
            self.history_cursor = None;
            return;
        }
        let next = match self.history_cursor {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(len - 1),
        };
        self.history_cursor = Some(next);
    }
}
