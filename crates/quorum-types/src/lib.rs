//! Core type definitions for Quorum.
//!
//! This crate provides the shared vocabulary of the orchestration core: raw
//! proposal fields as read from the index, DAO-level settings, operation
//! requests bound for the ledger, derived statuses and timeline elements.
//! Types only, no business logic.

pub mod dao;
pub mod history;
pub mod ids;
pub mod ledger;
pub mod operation;
pub mod proposal;
pub mod status;

pub use dao::{DaoSnapshot, Shaman, ShamanPermissions};
pub use history::{HistoryElement, HistoryKind, HistoryPayload, OrderingKey};
pub use ids::{Address, ChainId, DaoId, ProposalId, SubmissionHandle};
pub use ledger::LedgerProposalState;
pub use operation::{
    OperationArg, OperationKind, OperationRequest, OperationRequestBuilder, Overrides, RequestError,
};
pub use proposal::{CancellationMarker, ProcessingMarker, Proposal, Sponsorship};
pub use status::Status;
