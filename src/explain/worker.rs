//! Runs explanation requests off the UI thread.
//!
//! Each request gets its own thread; replies come back over an mpsc channel
//! that the event loop drains without blocking.

use super::{explain_or_fallback, ExplanationService, FAILURE_MESSAGE};
use crate::state::{ExplanationRequest, RequestId};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

/// Finished request, tagged with the id it was started under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationReply {
    /// Id of the request this answers.
    pub id: RequestId,
    /// Explanation text, or one of the fallback messages.
    pub text: String,
}

/// Background executor for [`ExplanationRequest`]s.
pub struct ExplanationWorker {
    service: Arc<dyn ExplanationService>,
    tx: Sender<ExplanationReply>,
    rx: Receiver<ExplanationReply>,
}

impl ExplanationWorker {
    /// Worker that runs every request against `service`.
    pub fn new(service: Arc<dyn ExplanationService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { service, tx, rx }
    }

    /// Start `request` on a new thread. Returns immediately.
    pub fn submit(&self, request: ExplanationRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let ExplanationRequest { id, query } = request;

        let spawned = thread::Builder::new()
            .name(format!("explain-{}", id.value()))
            .spawn(move || {
                let text = explain_or_fallback(service.as_ref(), &query);
                debug!(request_id = id.value(), "Explanation finished");
                // The receiver is gone only when the app is shutting down.
                let _ = tx.send(ExplanationReply { id, text });
            });

        if let Err(e) = spawned {
            error!(error = %e, "Failed to spawn explanation thread");
            let _ = self.tx.send(ExplanationReply {
                id,
                text: FAILURE_MESSAGE.to_string(),
            });
        }
    }

    /// Drain every reply that has arrived so far.
    pub fn poll(&self) -> Vec<ExplanationReply> {
        self.rx.try_iter().collect()
    }

    /// Block up to `timeout` for the next reply.
    pub fn wait(&self, timeout: Duration) -> Option<ExplanationReply> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::ExplainError;
    use crate::state::ExplanationState;
    use std::sync::{Condvar, Mutex};

    struct Echo;

    impl ExplanationService for Echo {
        fn explain(&self, problem: &str) -> Result<String, ExplainError> {
            Ok(format!("explained: {problem}"))
        }
    }

    struct Broken;

    impl ExplanationService for Broken {
        fn explain(&self, _problem: &str) -> Result<String, ExplainError> {
            Err(ExplainError::MissingCredential("TEST_KEY".to_string()))
        }
    }

    /// Blocks until released, to observe the worker while a call is pending.
    struct Gate {
        open: Mutex<bool>,
        cv: Condvar,
    }

    impl ExplanationService for Gate {
        fn explain(&self, _problem: &str) -> Result<String, ExplainError> {
            let mut open = self.open.lock().unwrap();
            while !*open {
                open = self.cv.wait(open).unwrap();
            }
            Ok("released".to_string())
        }
    }

    fn request(query: &str) -> ExplanationRequest {
        let mut state = ExplanationState::new();
        state.request(query).unwrap()
    }

    #[test]
    fn reply_carries_request_id_and_text() {
        let worker = ExplanationWorker::new(Arc::new(Echo));
        let req = request("2 + 3");
        let id = req.id;
        worker.submit(req);

        let reply = worker.wait(Duration::from_secs(5)).expect("reply");
        assert_eq!(reply.id, id);
        assert_eq!(reply.text, "explained: 2 + 3");
    }

    #[test]
    fn service_failure_becomes_fixed_message() {
        let worker = ExplanationWorker::new(Arc::new(Broken));
        worker.submit(request("1"));

        let reply = worker.wait(Duration::from_secs(5)).expect("reply");
        assert_eq!(reply.text, FAILURE_MESSAGE);
    }

    #[test]
    fn poll_does_not_block_while_request_pending() {
        let gate = Arc::new(Gate {
            open: Mutex::new(false),
            cv: Condvar::new(),
        });
        let worker = ExplanationWorker::new(gate.clone());
        worker.submit(request("7"));

        assert!(worker.poll().is_empty(), "nothing should have arrived yet");

        *gate.open.lock().unwrap() = true;
        gate.cv.notify_all();

        let reply = worker.wait(Duration::from_secs(5)).expect("reply");
        assert_eq!(reply.text, "released");
    }
}
