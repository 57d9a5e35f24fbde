//! UI state machine (pure).
//!
//! All state transitions are plain methods testable without a terminal.

pub mod app_state;
pub mod display;
pub mod explanation;

// Re-export for convenience
pub use app_state::{AppState, Effect};
pub use display::{DisplayState, ZERO_PLACEHOLDER};
pub use explanation::{ExplanationRequest, ExplanationState, RequestId};
