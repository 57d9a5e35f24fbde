//! Explanation panel state.
//!
//! Each started request gets a fresh id; a completion is applied only when it
//! carries the id of the latest request.

use super::display::ZERO_PLACEHOLDER;
use tracing::{debug, info};

/// Identifier of one explanation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw counter value, for logging.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A request the shell must hand to the explanation worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    /// Id the reply must carry to be applied.
    pub id: RequestId,
    /// Expression sent to the service.
    pub query: String,
}

/// Loading flag and last explanation text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplanationState {
    loading: bool,
    text: String,
    latest: Option<RequestId>,
    next_id: u64,
}

impl ExplanationState {
    /// Idle state with no text.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the latest request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last applied explanation, empty until one arrives.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Id of the most recently started request, if any.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// Start a request for `query`.
    ///
    /// Returns `None` (and changes nothing) when the query is empty, is the
    /// zero placeholder, or a request is already loading.
    pub fn request(&mut self, query: &str) -> Option<ExplanationRequest> {
        if query.is_empty() || query == ZERO_PLACEHOLDER {
            debug!("Explanation request ignored: nothing to explain");
            return None;
        }
        if self.loading {
            debug!("Explanation request ignored: already loading");
            return None;
        }

        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.latest = Some(id);
        self.loading = true;
        info!(request_id = id.value(), query, "Explanation requested");

        Some(ExplanationRequest {
            id,
            query: query.to_string(),
        })
    }

    /// Apply a finished request. Returns whether it was applied.
    pub fn complete(&mut self, id: RequestId, text: impl Into<String>) -> bool {
        if self.latest != Some(id) || !self.loading {
            debug!(request_id = id.value(), "Discarding stale explanation");
            return false;
        }
        self.loading = false;
        self.text = text.into();
        true
    }
}
