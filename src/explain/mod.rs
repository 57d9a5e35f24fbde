//! Explanation service (impure shell).
//!
//! The calculator forwards the current expression to a hosted text-generation
//! service and shows whatever comes back. Every failure collapses into one
//! fixed message; nothing here can take the session down.
//!
//! - [`ExplanationService`] - the one-operation seam the rest of the crate sees
//! - [`GeminiClient`] - blocking HTTP implementation
//! - [`ExplanationWorker`] - runs requests off the UI thread

use thiserror::Error;
use tracing::warn;

pub mod gemini;
pub mod worker;

pub use gemini::{ExplanationSettings, GeminiClient};
pub use worker::{ExplanationReply, ExplanationWorker};

/// Shown when the service fails for any reason.
pub const FAILURE_MESSAGE: &str = "An error occurred while contacting the explanation service.";

/// Shown when the service answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Sorry, the request could not be processed right now.";

/// Failures of the explanation service.
#[derive(Debug, Error)]
pub enum ExplainError {
    /// No API key in the configured environment variable.
    #[error("No API key found in ${0}")]
    MissingCredential(String),

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code returned by the service.
        status: u16,
        /// Response body, for the log.
        body: String,
    },

    /// The response could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Something that can explain a math problem.
pub trait ExplanationService: Send + Sync {
    /// Explain `problem`.
    ///
    /// Returns the generated text, which may be empty.
    fn explain(&self, problem: &str) -> Result<String, ExplainError>;
}

/// Ask `service` about `problem`, mapping every failure to a fixed message.
pub fn explain_or_fallback(service: &dyn ExplanationService, problem: &str) -> String {
    match service.explain(problem) {
        Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "Explanation service failed");
            FAILURE_MESSAGE.to_string()
        }
    }
}
