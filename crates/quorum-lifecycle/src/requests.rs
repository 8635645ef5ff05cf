//! Request builders for the built-in proposal operations.

use quorum_types::{
    ChainId, OperationArg, OperationKind, OperationRequest, OperationRequestBuilder, Proposal,
    RequestError,
};

use crate::gas::GasPolicy;

fn sequence_arg(proposal: &Proposal) -> Result<OperationArg, RequestError> {
    proposal
        .id
        .sequence()
        .map(OperationArg::Uint)
        .ok_or_else(|| RequestError::InvalidProposalId(proposal.id.clone()))
}

fn builder(kind: OperationKind, chain: &ChainId, proposal: &Proposal) -> OperationRequestBuilder {
    OperationRequest::builder(
        kind,
        chain.clone(),
        proposal.dao_id.clone(),
        proposal.id.clone(),
    )
}

pub fn sponsor_request(chain: &ChainId, proposal: &Proposal) -> Result<OperationRequest, RequestError> {
    builder(OperationKind::Sponsor, chain, proposal)
        .arg(sequence_arg(proposal)?)
        .build()
}

pub fn vote_request(
    chain: &ChainId,
    proposal: &Proposal,
    approved: bool,
) -> Result<OperationRequest, RequestError> {
    builder(OperationKind::Vote, chain, proposal)
        .arg(sequence_arg(proposal)?)
        .arg(OperationArg::Bool(approved))
        .build()
}

pub fn cancel_request(chain: &ChainId, proposal: &Proposal) -> Result<OperationRequest, RequestError> {
    builder(OperationKind::Cancel, chain, proposal)
        .arg(sequence_arg(proposal)?)
        .build()
}

/// Process request carrying the proposal's action payload and a gas ceiling
/// from `gas`.
pub fn process_request(
    chain: &ChainId,
    proposal: &Proposal,
    gas: &GasPolicy,
) -> Result<OperationRequest, RequestError> {
    builder(OperationKind::Process, chain, proposal)
        .arg(sequence_arg(proposal)?)
        .arg(OperationArg::Bytes(proposal.proposal_data.clone()))
        .gas_limit(gas.processing_gas_limit(proposal.action_gas_estimate))
        .build()
}
