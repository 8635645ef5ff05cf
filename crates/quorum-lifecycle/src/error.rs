use std::time::Duration;

use quorum_gate::{InFlightKey, RegistryError};
use quorum_types::ProposalId;
use thiserror::Error;

/// Why a request never made it into the ledger's pending pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The signer declined the request
    #[error("request declined by the signer")]
    UserRejected,

    /// The ledger refused the request; the reason is surfaced verbatim
    #[error("{decoded_reason}")]
    LedgerRejected { decoded_reason: String },

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("ledger did not acknowledge the request in time")]
    Timeout,
}

/// Why an accepted request did not reach inclusion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("transaction dropped from the pending pool")]
    Dropped,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("transaction was not confirmed in time")]
    Timeout,
}

/// Errors from a ledger state query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerQueryError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode ledger response: {0}")]
    Decode(String),
}

/// Errors from a single index read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("index transport error: {0}")]
    Transport(String),

    /// The index has not ingested the entity yet
    #[error("{0} not found in index")]
    NotFound(ProposalId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// A single read failed in transit. Retried within the poll budget.
    #[error("index read failed: {0}")]
    Transport(String),

    #[error("index did not reflect the change after {attempts} reads in {elapsed:?}")]
    Timeout {
        attempts: u32,
        elapsed: Duration,
        /// Outcome of the last read that did not satisfy the predicate
        last_error: Option<String>,
    },

    #[error("polling cancelled")]
    Cancelled,
}

impl From<IndexError> for PollError {
    fn from(err: IndexError) -> Self {
        PollError::Transport(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("operation already in flight: {0}")]
    AlreadyInFlight(InFlightKey),

    #[error("lifecycle task failed: {0}")]
    TaskFailed(String),
}

impl From<RegistryError> for CoordinatorError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::AlreadyInFlight(key) => CoordinatorError::AlreadyInFlight(key),
        }
    }
}
