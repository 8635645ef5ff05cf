use chrono::{DateTime, Utc};
use quorum_types::Proposal;

use crate::params::GovernanceParams;

/// A period boundary, either recorded by the index or computed from
/// governance durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bound {
    pub at: DateTime<Utc>,
    pub derived: bool,
}

impl Bound {
    fn recorded(at: DateTime<Utc>) -> Self {
        Self { at, derived: false }
    }

    fn computed(at: DateTime<Utc>) -> Self {
        Self { at, derived: true }
    }
}

/// Voting and grace boundaries of a sponsored proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodBounds {
    pub voting_ends: Option<Bound>,
    pub grace_ends: Option<Bound>,
}

impl PeriodBounds {
    /// Resolve the boundaries of `proposal`, filling missing raw bounds from
    /// the voting start plus the configured durations.
    ///
    /// Unsponsored proposals have no boundaries.
    pub fn resolve(proposal: &Proposal, params: &GovernanceParams) -> Self {
        if !proposal.is_sponsored() {
            return Self {
                voting_ends: None,
                grace_ends: None,
            };
        }

        let voting_ends = proposal.voting_ends.map(Bound::recorded).or_else(|| {
            proposal
                .voting_opened_at()
                .and_then(|opened| opened.checked_add_signed(params.voting_period()))
                .map(Bound::computed)
        });

        let grace_ends = proposal.grace_ends.map(Bound::recorded).or_else(|| {
            voting_ends
                .and_then(|end| end.at.checked_add_signed(params.grace_period()))
                .map(Bound::computed)
        });

        Self {
            voting_ends,
            grace_ends,
        }
    }
}
