use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::types::{AttemptOutcome, FailureKind};

/// Counters accumulated over a run.
///
/// `successful + failed` is the number of recorded outcomes and the status
/// histogram always sums to `successful`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSnapshot {
    pub successful: u64,
    pub failed: u64,
    pub timeouts: u64,
    pub connection_resets: u64,
    pub build_errors: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub sample_body: Option<String>,
}

impl AggregateSnapshot {
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.successful.saturating_add(self.failed)
    }

    fn apply(&mut self, outcome: AttemptOutcome) {
        match outcome {
            AttemptOutcome::Success { status, body, .. } => {
                self.successful = self.successful.saturating_add(1);
                let count = self.status_codes.entry(status).or_insert(0);
                *count = count.saturating_add(1);
                // Write-once: later bodies never replace the retained sample.
                if self.sample_body.is_none() {
                    self.sample_body = body;
                }
            }
            AttemptOutcome::Failure { kind, .. } => {
                self.failed = self.failed.saturating_add(1);
                match kind {
                    FailureKind::Timeout => {
                        self.timeouts = self.timeouts.saturating_add(1);
                    }
                    FailureKind::ConnectionReset => {
                        self.connection_resets = self.connection_resets.saturating_add(1);
                    }
                    FailureKind::MalformedUrl | FailureKind::Build => {
                        self.build_errors = self.build_errors.saturating_add(1);
                    }
                    FailureKind::Other => {}
                }
            }
        }
    }
}

/// Shared aggregate state. Every dispatcher records into the same instance;
/// the lock is only held while counters are updated.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Mutex<AggregateSnapshot>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: AttemptOutcome) {
        // `apply` never panics, so a poisoned lock still holds whole counters.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.apply(outcome);
    }

    #[must_use]
    pub fn snapshot(&self) -> AggregateSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn into_snapshot(self) -> AggregateSnapshot {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
