//! Domain-level actions independent of key bindings.

use super::{Mode, Operator};

/// Domain-level actions that keyboard and mouse input map onto.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`;
/// keypad buttons carry their `KeyAction` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Keypad
    /// Append a digit or the decimal point to the current operand. Default: 0-9, .
    Digit(char),
    /// Finalize the operand with a binary operator. Default: + - * /
    Operator(Operator),
    /// Evaluate the full expression. Default: Enter/=
    Evaluate,
    /// Remove the last character of the operand. Default: Backspace
    Backspace,
    /// Reset operand and pending expression. Default: Esc/Delete/c
    Clear,

    // Modes
    /// Select a specific body panel. Default: F1/F2/F3
    SelectMode(Mode),
    /// Cycle Standard → Scientific → AI. Default: Tab
    CycleMode,

    // Explanation
    /// Ask the explanation service about the current expression. Default: e
    RequestExplanation,

    // History
    /// Move the history cursor towards newer entries. Default: ↑/k
    HistoryUp,
    /// Move the history cursor towards older entries. Default: ↓/j
    HistoryDown,
    /// Load the result of the highlighted history entry. Default: Space
    SelectHistory,
    /// Load the result of a specific history entry (mouse click).
    SelectHistoryAt(usize),

    // Application
    /// Toggle the dark/light theme. Default: t
    ToggleTheme,
    /// Show or hide the help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether the action is one of the calculator keypad actions.
    ///
    /// Keypad actions dismiss the error marker.
    pub fn is_keypad(self) -> bool {
        matches!(
            self,
            KeyAction::Digit(_)
                | KeyAction::Operator(_)
                | KeyAction::Evaluate
                | KeyAction::Backspace
                | KeyAction::Clear
        )
    }
}
