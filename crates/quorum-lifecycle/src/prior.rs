use quorum_gate::PriorProposalCheck;
use quorum_types::{LedgerProposalState, Proposal};
use tracing::{debug, warn};

use crate::traits::LedgerClient;

/// Ask the ledger for the state of the proposal `proposal` depends on.
///
/// Proposals without a predecessor resolve to `Unborn`, which never blocks.
pub async fn check_prior_proposal(ledger: &dyn LedgerClient, proposal: &Proposal) -> PriorProposalCheck {
    let Some(prior) = &proposal.prev_proposal_id else {
        return PriorProposalCheck::Resolved(LedgerProposalState::Unborn);
    };

    match ledger.proposal_state(&proposal.dao_id, prior).await {
        Ok(state) => {
            debug!(
                proposal_id = %proposal.id,
                prior = %prior,
                code = state.code(),
                "Prior proposal state resolved"
            );
            PriorProposalCheck::Resolved(state)
        }
        Err(err) => {
            warn!(proposal_id = %proposal.id, prior = %prior, error = %err, "Prior proposal lookup failed");
            PriorProposalCheck::Unavailable(err.to_string())
        }
    }
}
