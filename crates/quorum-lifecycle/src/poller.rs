//! Reconciles the index with a confirmed ledger change.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use quorum_status::StatusDeriver;
use quorum_types::{DaoId, Proposal, ProposalId, Status, SubmissionHandle};
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::PollConfig;
use crate::error::PollError;
use crate::traits::IndexClient;

/// What the poller reads back from the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncWitness {
    pub dao: DaoId,
    pub proposal_id: ProposalId,
    /// The submission whose effect is awaited
    pub handle: Option<SubmissionHandle>,
}

impl SyncWitness {
    pub fn new(dao: DaoId, proposal_id: ProposalId) -> Self {
        Self {
            dao,
            proposal_id,
            handle: None,
        }
    }

    pub fn with_handle(mut self, handle: SubmissionHandle) -> Self {
        self.handle = Some(handle);
        self
    }
}

type Predicate = dyn Fn(&Proposal) -> bool + Send + Sync;

/// Predicate a read must satisfy for the index to count as synced.
#[derive(Clone)]
pub struct ExpectedChange {
    description: String,
    predicate: Arc<Predicate>,
}

impl ExpectedChange {
    pub fn custom(
        description: impl Into<String>,
        predicate: impl Fn(&Proposal) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Status derived at the fixed instant `at` differs from `from`.
    ///
    /// Pinning the instant means only indexed field changes count; a period
    /// boundary passing while polling does not.
    pub fn status_changed_from(deriver: StatusDeriver, from: Status, at: DateTime<Utc>) -> Self {
        Self::custom(format!("status changed from {from}"), move |proposal| {
            deriver.derive(proposal, at) != from
        })
    }

    pub fn is_cancelled() -> Self {
        Self::custom("cancellation indexed", Proposal::is_cancelled)
    }

    pub fn is_processed() -> Self {
        Self::custom("processing indexed", Proposal::is_processed)
    }

    pub fn is_sponsored() -> Self {
        Self::custom("sponsorship indexed", Proposal::is_sponsored)
    }

    pub fn matches(&self, proposal: &Proposal) -> bool {
        (self.predicate)(proposal)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for ExpectedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectedChange")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Successful poll outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncReport {
    pub attempts: u32,
    pub elapsed: Duration,
    /// The first read that satisfied the predicate
    pub proposal: Proposal,
}

/// Reads the index at a fixed interval until it reflects an expected change.
///
/// The first read happens immediately. Reads stop after `max_attempts` or
/// once `max_elapsed` has passed, whichever comes first. Transport failures
/// and not-yet-indexed reads count against the same budget.
#[derive(Clone)]
pub struct IndexPoller {
    index: Arc<dyn IndexClient>,
    config: PollConfig,
}

impl IndexPoller {
    pub fn new(index: Arc<dyn IndexClient>, config: PollConfig) -> Self {
        Self { index, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub async fn poll_until_synced(
        &self,
        witness: &SyncWitness,
        expected: &ExpectedChange,
        cancel: &CancelToken,
    ) -> Result<SyncReport, PollError> {
        let mut cancel = cancel.clone();
        let started = Instant::now();
        let deadline = started + self.config.max_elapsed();
        let mut attempts = 0u32;
        let mut last_error = None;

        debug!(
            proposal_id = %witness.proposal_id,
            expected = expected.description(),
            max_attempts = self.config.max_attempts,
            "Polling index"
        );

        while attempts < self.config.max_attempts {
            if cancel.is_cancelled() {
                return Err(PollError::Cancelled);
            }

            if attempts > 0 {
                let next = (Instant::now() + self.config.interval()).min(deadline);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(PollError::Cancelled),
                    _ = sleep_until(next) => {}
                }
                if Instant::now() >= deadline {
                    break;
                }
            }

            attempts += 1;
            let read = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                read = timeout_at(deadline, self.index.read(&witness.dao, &witness.proposal_id)) => read,
            };

            match read {
                Err(_) => {
                    last_error = Some("index read exceeded the poll deadline".to_string());
                    break;
                }
                Ok(Ok(proposal)) if expected.matches(&proposal) => {
                    let elapsed = started.elapsed();
                    info!(
                        proposal_id = %witness.proposal_id,
                        attempt = attempts,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Index synced"
                    );
                    return Ok(SyncReport {
                        attempts,
                        elapsed,
                        proposal,
                    });
                }
                Ok(Ok(_)) => {
                    debug!(proposal_id = %witness.proposal_id, attempt = attempts, "Index not yet synced");
                    last_error = Some(format!("{} not observed", expected.description()));
                }
                Ok(Err(err)) => {
                    let err = PollError::from(err);
                    debug!(proposal_id = %witness.proposal_id, attempt = attempts, error = %err, "Index read failed");
                    last_error = Some(err.to_string());
                }
            }
        }

        let elapsed = started.elapsed();
        warn!(
            proposal_id = %witness.proposal_id,
            attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            "Index did not sync within budget"
        );
        Err(PollError::Timeout {
            attempts,
            elapsed,
            last_error,
        })
    }
}
