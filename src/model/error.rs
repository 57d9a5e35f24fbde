//! Error types for the calculator core.
//!
//! Every error in this module is recoverable: it is surfaced to the user at the
//! point of the triggering action and never propagates past the component that
//! produced it.
//!
//! # Error Hierarchy
//!
//! - [`EvaluationError`] - the evaluator could not turn the expression into a number
//!
//! Explanation service failures live next to the service in
//! [`crate::explain::ExplainError`]; terminal and startup failures live in the
//! shell modules (`view`, `config`, `logging`).

use thiserror::Error;

/// Fixed marker shown in the display when an evaluation fails.
pub const ERROR_MARKER: &str = "Error";

/// Failure outcome of evaluating an arithmetic expression.
///
/// Displayed as [`ERROR_MARKER`]; no history entry is recorded and the operand
/// and pending expression stay as they were so the user can correct them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// Nothing left to evaluate after stripping unsupported characters.
    #[error("Empty expression")]
    Empty,

    /// The sanitized text is not a valid arithmetic expression.
    ///
    /// Covers dangling operators (`2 +`), juxtaposed operands (`2(3)`),
    /// bad numerals (`1.2.3`) and trailing input.
    #[error("Malformed expression: {reason}")]
    MalformedExpression {
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// An opening parenthesis has no matching close, or vice versa.
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    /// Division by zero, including `0 / 0`.
    ///
    /// Reported as an error rather than an infinite or NaN value.
    #[error("Division by zero")]
    DivideByZero,

    /// The result does not fit in a finite `f64`.
    #[error("Result out of range")]
    Overflow,
}

impl EvaluationError {
    /// Shorthand for a [`EvaluationError::MalformedExpression`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedExpression {
            reason: reason.into(),
        }
    }
}
