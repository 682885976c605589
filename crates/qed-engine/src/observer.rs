use std::sync::{Arc, Mutex};

use crate::method::ProofMethod;
use crate::status::ProofStatus;

/// Receives verification progress. The engine never prints.
pub trait VerificationObserver {
    /// A strategy is about to run.
    fn started(&self, _obligation: &str, _method: ProofMethod) {}
    /// A derivation step was recorded.
    fn step(&self, _obligation: &str, _step: &str) {}
    /// The attempt faulted; the obligation will be `Unknown`.
    fn fault(&self, _obligation: &str, _message: &str) {}
    /// The attempt finished with this status.
    fn finished(&self, _obligation: &str, _status: ProofStatus) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl VerificationObserver for NullObserver {}

/// Forwards events as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl VerificationObserver for TracingObserver {
    fn started(&self, obligation: &str, method: ProofMethod) {
        tracing::debug!(obligation, method = method.as_str(), "verification started");
    }

    fn step(&self, obligation: &str, step: &str) {
        tracing::trace!(obligation, step, "proof step");
    }

    fn fault(&self, obligation: &str, message: &str) {
        tracing::warn!(obligation, message, "verification fault");
    }

    fn finished(&self, obligation: &str, status: ProofStatus) {
        tracing::debug!(obligation, status = status.as_str(), "verification finished");
    }
}

/// Event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    /// See [`VerificationObserver::started`].
    Started {
        /// Obligation name.
        obligation: String,
        /// Strategy method.
        method: ProofMethod,
    },
    /// See [`VerificationObserver::step`].
    Step {
        /// Obligation name.
        obligation: String,
        /// Recorded step.
        step: String,
    },
    /// See [`VerificationObserver::fault`].
    Fault {
        /// Obligation name.
        obligation: String,
        /// Fault description.
        message: String,
    },
    /// See [`VerificationObserver::finished`].
    Finished {
        /// Obligation name.
        obligation: String,
        /// Final status.
        status: ProofStatus,
    },
}

/// Collects events; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl RecordingObserver {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ObserverEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl VerificationObserver for RecordingObserver {
    fn started(&self, obligation: &str, method: ProofMethod) {
        self.push(ObserverEvent::Started {
            obligation: obligation.to_string(),
            method,
        });
    }

    fn step(&self, obligation: &str, step: &str) {
        self.push(ObserverEvent::Step {
            obligation: obligation.to_string(),
            step: step.to_string(),
        });
    }

    fn fault(&self, obligation: &str, message: &str) {
        self.push(ObserverEvent::Fault {
            obligation: obligation.to_string(),
            message: message.to_string(),
        });
    }

    fn finished(&self, obligation: &str, status: ProofStatus) {
        self.push(ObserverEvent::Finished {
            obligation: obligation.to_string(),
            status,
        });
    }
}
