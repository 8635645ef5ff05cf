use quorum_types::{OperationKind, SubmissionHandle};
use serde::{Deserialize, Serialize};

use crate::error::{ConfirmationError, PollError, SubmissionError};

/// Progress of one coordinator run.
///
/// ```text
/// Idle -> Submitting -> AwaitingConfirmation -> Confirmed -> Indexing -> Synced
///             |                  |                                  \-> IndexTimeout
///             v                  v
///      SubmissionFailed   ConfirmationFailed
/// ```
///
/// Any non-terminal state may also move to `Cancelled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    Idle,
    Submitting,
    AwaitingConfirmation,
    Confirmed,
    Indexing,
    Synced,
    IndexTimeout,
    SubmissionFailed,
    ConfirmationFailed,
    Cancelled,
}

impl CoordinatorState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CoordinatorState::Synced
                | CoordinatorState::IndexTimeout
                | CoordinatorState::SubmissionFailed
                | CoordinatorState::ConfirmationFailed
                | CoordinatorState::Cancelled
        )
    }

    /// Whether the ledger mutation is known to have happened.
    pub fn is_success(self) -> bool {
        matches!(self, CoordinatorState::Synced | CoordinatorState::IndexTimeout)
    }
}

/// Events emitted by a run, in state-machine order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The ledger accepted the request into its pending pool
    Submitted { handle: SubmissionHandle },
    /// The ledger included the request
    Confirmed { handle: SubmissionHandle },
    /// The index reflects the change
    Synced { handle: SubmissionHandle, attempts: u32 },
    SubmissionFailed { reason: SubmissionError },
    ConfirmationFailed {
        handle: SubmissionHandle,
        reason: ConfirmationError,
    },
    /// The change is on the ledger but the index has not caught up
    IndexPollFailed {
        handle: SubmissionHandle,
        reason: PollError,
    },
}

impl LifecycleEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            LifecycleEvent::Submitted { .. } | LifecycleEvent::Confirmed { .. }
        )
    }

    pub fn handle(&self) -> Option<&SubmissionHandle> {
        match self {
            LifecycleEvent::Submitted { handle }
            | LifecycleEvent::Confirmed { handle }
            | LifecycleEvent::Synced { handle, .. }
            | LifecycleEvent::ConfirmationFailed { handle, .. }
            | LifecycleEvent::IndexPollFailed { handle, .. } => Some(handle),
            LifecycleEvent::SubmissionFailed { .. } => None,
        }
    }

    /// How the event is presented for an operation of `kind`.
    pub fn notice(&self, kind: &OperationKind) -> Notice {
        let label = kind.label();
        match self {
            LifecycleEvent::Submitted { .. } => Notice::new(
                Tone::Informational,
                format!("{label} Submitted"),
                "Waiting for the transaction to be confirmed",
            ),
            LifecycleEvent::Confirmed { .. } => Notice::new(
                Tone::Informational,
                format!("{label} Confirmed"),
                "Please wait for subgraph to sync",
            ),
            LifecycleEvent::Synced { .. } => Notice::new(
                Tone::Success,
                format!("{label} Success"),
                "Sync Complete",
            ),
            LifecycleEvent::SubmissionFailed {
                reason: SubmissionError::UserRejected,
            } => Notice::new(
                Tone::Silent,
                format!("{label} Declined"),
                "The request was declined before submission",
            ),
            LifecycleEvent::SubmissionFailed { reason } => {
                Notice::new(Tone::Blocking, format!("{label} Failed"), reason.to_string())
            }
            LifecycleEvent::ConfirmationFailed { reason, .. } => {
                Notice::new(Tone::Blocking, format!("{label} Failed"), reason.to_string())
            }
            LifecycleEvent::IndexPollFailed { .. } => Notice::new(
                Tone::SuccessWithDelay,
                format!("{label} Success"),
                "Your action succeeded; the display will catch up shortly",
            ),
        }
    }
}

/// Presentation class of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// The user declined; reset without an error
    Silent,
    Blocking,
    Informational,
    SuccessWithDelay,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub tone: Tone,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(tone: Tone, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            description: description.into(),
        }
    }
}
