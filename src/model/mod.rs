//! Domain model types (pure).
//!
//! All types in this module are plain data with no I/O.

pub mod error;
pub mod history;
pub mod key_action;
pub mod mode;
pub mod operator;

// Re-export for convenience
pub use error::{EvaluationError, ERROR_MARKER};
pub use history::{HistoryEntry, HistoryLog, HISTORY_CAPACITY};
pub use key_action::KeyAction;
pub use mode::{Mode, Theme, UnknownVariant};
pub use operator::Operator;
