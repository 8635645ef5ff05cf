//! Lifecycle of a single ledger operation, from request to a synced index.
//!
//! The ledger is authoritative; the index trails it. A run submits the
//! request, waits for inclusion, then polls the index until it reflects the
//! change or the poll budget runs out. An index timeout after confirmation
//! is a success whose display lags, never a failure of the operation.
//!
//! ```text
//! caller -> ActionGate -> LifecycleCoordinator::start
//!        -> TransactionSubmitter::submit -> await_confirmation
//!        -> IndexPoller::poll_until_synced -> events to the caller
//! ```

pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod gas;
pub mod mocks;
pub mod poller;
pub mod prior;
pub mod requests;
pub mod submitter;
pub mod traits;

pub use cancel::{cancel_pair, CancelSource, CancelToken};
pub use config::{PollConfig, SubmissionConfig};
pub use coordinator::{LifecycleCoordinator, LifecycleHandle};
pub use error::{
    ConfirmationError, CoordinatorError, IndexError, LedgerQueryError, PollError, SubmissionError,
};
pub use events::{CoordinatorState, LifecycleEvent, Notice, Tone};
pub use gas::GasPolicy;
pub use mocks::{ScriptedIndex, ScriptedLedger};
pub use poller::{ExpectedChange, IndexPoller, SyncReport, SyncWitness};
pub use prior::check_prior_proposal;
pub use requests::{cancel_request, process_request, sponsor_request, vote_request};
pub use submitter::TransactionSubmitter;
pub use traits::{IndexClient, LedgerClient, Receipt};
