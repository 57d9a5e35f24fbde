//! Expression/display state: the operand being typed and the pending prefix.

use crate::model::{EvaluationError, Operator, ERROR_MARKER};
use tracing::debug;

/// Placeholder operand shown when nothing has been typed.
pub const ZERO_PLACEHOLDER: &str = "0";

/// Operand and pending expression.
///
/// `current_operand` is always a numeral in progress (digits, at most one
/// decimal point, a leading minus only when it holds a result) or
/// [`ZERO_PLACEHOLDER`]. `pending_expression` is empty or `"<operand> <op> "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    current_operand: String,
    pending_expression: String,
    error: Option<EvaluationError>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            current_operand: ZERO_PLACEHOLDER.to_string(),
            pending_expression: String::new(),
            error: None,
        }
    }
}

impl DisplayState {
    /// Display showing the `0` placeholder with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operand being typed, or the last result.
    pub fn current_operand(&self) -> &str {
        &self.current_operand
    }

    /// Expression waiting for its right-hand operand, e.g. `"12 + "`.
    pub fn pending_expression(&self) -> &str {
        &self.pending_expression
    }

    /// The error from the last failed evaluation, until the next keypad action.
    pub fn error(&self) -> Option<&EvaluationError> {
        self.error.as_ref()
    }

    /// Main display line: the operand, or the error marker after a failure.
    pub fn display_text(&self) -> &str {
        if self.error.is_some() {
            ERROR_MARKER
        } else {
            &self.current_operand
        }
    }

    /// `pending + operand`, the text handed to the evaluator.
    pub fn full_expression(&self) -> String {
        format!("{}{}", self.pending_expression, self.current_operand)
    }

    /// Text sent to the explanation service.
    pub fn explanation_query(&self) -> String {
        if self.pending_expression.is_empty() {
            self.current_operand.clone()
        } else {
            format!("{} {}", self.pending_expression, self.current_operand)
        }
    }

    /// Append a digit (`0`-`9`) or the decimal point.
    ///
    /// Replaces the zero placeholder; a second decimal point is ignored.
    pub fn append_digit(&mut self, d: char) {
        if !(d.is_ascii_digit() || d == '.') {
            return;
        }
        if d == '.' {
            if self.current_operand.contains('.') {
                return;
            }
            if self.is_placeholder() {
                self.current_operand = "0.".to_string();
                return;
            }
        }

        if self.is_placeholder() {
            self.current_operand = d.to_string();
        } else {
            self.current_operand.push(d);
        }
    }

    /// Finalize the operand: `pending = "<operand> <op> "`, operand back to zero.
    ///
    /// A previous pending expression is overwritten, not chained.
    pub fn apply_operator(&mut self, op: Operator) {
        self.pending_expression = format!("{} {} ", self.current_operand, op.symbol());
        self.current_operand = ZERO_PLACEHOLDER.to_string();
        debug!(pending = %self.pending_expression, "Operator applied");
    }

    /// Drop the last character of the operand, falling back to the placeholder.
    pub fn backspace(&mut self) {
        self.current_operand.pop();
        if self.current_operand.is_empty() || self.current_operand == "-" {
            self.current_operand = ZERO_PLACEHOLDER.to_string();
        }
    }

    /// Reset operand and pending expression.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Show a successful result: pending cleared, operand holds the result.
    pub fn show_result(&mut self, result: impl Into<String>) {
        self.current_operand = result.into();
        self.pending_expression.clear();
        self.error = None;
    }

    /// Show the error marker; operand and pending expression stay as they were.
    pub fn show_error(&mut self, error: EvaluationError) {
        self.error = Some(error);
    }

    /// Put a previous result into the operand (history selection).
    pub fn load_result(&mut self, result: impl Into<String>) {
        self.current_operand = result.into();
        self.error = None;
    }

    /// Hide the error marker, keeping operand and pending expression.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn is_placeholder(&self) -> bool {
        self.current_operand == ZERO_PLACEHOLDER
    }
}
