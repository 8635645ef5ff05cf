use async_trait::async_trait;
use quorum_types::{
    DaoId, LedgerProposalState, OperationRequest, Proposal, ProposalId, SubmissionHandle,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfirmationError, IndexError, LedgerQueryError, SubmissionError};

/// Proof that a submitted request was included by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub handle: SubmissionHandle,
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// The authoritative ledger.
///
/// Encoding and addressing of requests are the implementation's concern.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Hand a request to the ledger. Resolves once it is accepted into the
    /// pending pool.
    async fn submit(&self, request: &OperationRequest) -> Result<SubmissionHandle, SubmissionError>;

    /// Wait until the ledger includes the request behind `handle`.
    async fn await_confirmation(&self, handle: &SubmissionHandle)
        -> Result<Receipt, ConfirmationError>;

    /// The ledger's own view of a proposal.
    async fn proposal_state(
        &self,
        dao: &DaoId,
        proposal_id: &ProposalId,
    ) -> Result<LedgerProposalState, LedgerQueryError>;
}

/// The eventually-consistent index all read paths use.
#[async_trait]
pub trait IndexClient: Send + Sync {
    async fn read(&self, dao: &DaoId, proposal_id: &ProposalId) -> Result<Proposal, IndexError>;
}
