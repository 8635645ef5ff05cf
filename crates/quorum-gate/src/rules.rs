//! Builders that resolve domain predicates into [`GateRule`]s.

use quorum_types::{Address, ChainId, DaoSnapshot, LedgerProposalState, OperationKind, Proposal, Status};
use serde::{Deserialize, Serialize};

use crate::registry::{InFlightKey, InFlightRegistry};
use crate::rule::GateRule;

pub const WRONG_NETWORK: &str = "You are not connected to the same network as the DAO";
pub const TX_PENDING: &str = "Please wait for transaction to complete";
pub const CANCEL_NOT_PERMITTED: &str = "Proposal can only be cancelled by the proposer, by a governance shaman or if the sponsor's voting token balance has fallen below the sponsor threshold";
pub const PRIOR_NOT_SETTLED: &str = "Another proposal in the DAO needs to executed first.";
pub const PRIOR_PENDING: &str = "Checking execution data.";
pub const PRIOR_LOOKUP_FAILED: &str = "Network Error. Could not check for Proposal status";

/// The account attempting an operation and the chain it is connected to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub address: Address,
    pub chain: ChainId,
}

impl CallerContext {
    pub fn new(address: Address, chain: ChainId) -> Self {
        Self { address, chain }
    }
}

/// State of the ledger-side lookup of the prior proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriorProposalCheck {
    /// Lookup not finished yet
    Pending,
    Resolved(LedgerProposalState),
    /// Lookup failed, with the transport message
    Unavailable(String),
}

pub fn network_matches(caller_chain: &ChainId, dao_chain: &ChainId) -> GateRule {
    GateRule::check(caller_chain == dao_chain, WRONG_NETWORK)
}

pub fn not_in_flight(registry: &InFlightRegistry, key: &InFlightKey) -> GateRule {
    GateRule::check(!registry.is_in_flight(key), TX_PENDING)
}

/// Statuses in which an operation of `kind` may be submitted. Custom
/// operations carry no status constraint.
pub fn permitted_statuses(kind: &OperationKind) -> Option<&'static [Status]> {
    match kind {
        OperationKind::Sponsor => Some(&[Status::Draft]),
        OperationKind::Vote | OperationKind::Cancel => Some(&[Status::Voting]),
        OperationKind::Process => Some(&[Status::ReadyForProcessing]),
        OperationKind::Custom(_) => None,
    }
}

pub fn status_permits(status: Status, kind: &OperationKind) -> GateRule {
    match permitted_statuses(kind) {
        None => GateRule::Allowed,
        Some(permitted) => GateRule::check(
            permitted.contains(&status),
            format!("{} is not available while the proposal is {}", kind.label(), status),
        ),
    }
}

/// The proposer may always cancel. Anyone may cancel once the sponsor's
/// voting power drops below the DAO threshold, and governor shamans may
/// cancel at any time.
pub fn can_cancel(proposal: &Proposal, dao: &DaoSnapshot, caller: &Address) -> GateRule {
    let is_proposer = proposal.created_by == *caller;
    let sponsor_below_threshold = proposal
        .sponsorship
        .as_ref()
        .is_some_and(|sponsorship| sponsorship.sponsor_voting_power < dao.sponsor_threshold);
    let is_governor = dao.is_governor_shaman(caller);

    GateRule::check(
        is_proposer || sponsor_below_threshold || is_governor,
        CANCEL_NOT_PERMITTED,
    )
}

pub fn prior_proposal_settled(check: &PriorProposalCheck) -> GateRule {
    match check {
        PriorProposalCheck::Pending => GateRule::denied(PRIOR_PENDING),
        PriorProposalCheck::Unavailable(_) => GateRule::denied(PRIOR_LOOKUP_FAILED),
        PriorProposalCheck::Resolved(state) => {
            GateRule::check(state.unblocks_successor(), PRIOR_NOT_SETTLED)
        }
    }
}

pub fn has_capability(granted: bool, message: impl Into<String>) -> GateRule {
    GateRule::check(granted, message)
}
