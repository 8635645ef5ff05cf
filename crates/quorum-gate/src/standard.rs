use chrono::{DateTime, Utc};
use quorum_status::StatusDeriver;
use quorum_types::{DaoSnapshot, OperationKind, Proposal};
use tracing::debug;

use crate::gate::{ActionGate, Decision};
use crate::registry::{InFlightKey, InFlightRegistry};
use crate::rule::GateRule;
use crate::rules::{self, CallerContext, PriorProposalCheck};

/// The rule set each built-in operation kind is gated behind.
pub struct StandardRules<'a> {
    deriver: &'a StatusDeriver,
    registry: &'a InFlightRegistry,
}

impl<'a> StandardRules<'a> {
    pub fn new(deriver: &'a StatusDeriver, registry: &'a InFlightRegistry) -> Self {
        Self { deriver, registry }
    }

    /// Resolve the ordered rule set for `kind` on `proposal` at `now`.
    ///
    /// `prior` is only consulted for `Process` on proposals that reference a
    /// prior proposal.
    pub fn rules(
        &self,
        kind: &OperationKind,
        proposal: &Proposal,
        dao: &DaoSnapshot,
        caller: &CallerContext,
        prior: &PriorProposalCheck,
        now: DateTime<Utc>,
    ) -> Vec<GateRule> {
        let status = self.deriver.derive(proposal, now);
        let key = InFlightKey::new(
            caller.address.clone(),
            proposal.dao_id.clone(),
            proposal.id.clone(),
            kind.clone(),
        );

        debug!(
            proposal_id = %proposal.id,
            kind = %kind,
            status = %status,
            "Resolving gate rules"
        );

        let mut set = vec![
            rules::network_matches(&caller.chain, &dao.chain),
            rules::not_in_flight(self.registry, &key),
            rules::status_permits(status, kind),
        ];

        match kind {
            OperationKind::Cancel => {
                set.push(rules::can_cancel(proposal, dao, &caller.address));
            }
            OperationKind::Process if proposal.prev_proposal_id.is_some() => {
                set.push(rules::prior_proposal_settled(prior));
            }
            _ => {}
        }

        set
    }

    /// Resolve and evaluate the rule set in one step.
    pub fn evaluate(
        &self,
        kind: &OperationKind,
        proposal: &Proposal,
        dao: &DaoSnapshot,
        caller: &CallerContext,
        prior: &PriorProposalCheck,
        now: DateTime<Utc>,
    ) -> Decision {
        ActionGate::new().evaluate(&self.rules(kind, proposal, dao, caller, prior, now))
    }
}
