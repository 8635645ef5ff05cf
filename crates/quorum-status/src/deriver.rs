use chrono::{DateTime, Utc};
use quorum_types::{Proposal, Status};

use crate::params::GovernanceParams;
use crate::periods::PeriodBounds;
use crate::quorum::QuorumRule;

/// Derives a proposal's lifecycle status from raw fields and an instant.
///
/// Pure and deterministic: the status is never cached, and the same raw
/// fields with the same `now` always yield the same status. Once voting and
/// grace have elapsed the outcome depends only on the tallies, so time never
/// expires a `ReadyForProcessing` proposal.
#[derive(Clone, Debug, Default)]
pub struct StatusDeriver {
    params: GovernanceParams,
}

impl StatusDeriver {
    pub fn new(params: GovernanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn quorum(&self) -> QuorumRule {
        QuorumRule::from(&self.params)
    }

    pub fn bounds(&self, proposal: &Proposal) -> PeriodBounds {
        PeriodBounds::resolve(proposal, &self.params)
    }

    /// Derive the status of `proposal` at `now`. First matching rule wins.
    pub fn derive(&self, proposal: &Proposal, now: DateTime<Utc>) -> Status {
        if proposal.is_cancelled() {
            return Status::Cancelled;
        }
        if proposal.is_processed() {
            return Status::Processed;
        }
        if !proposal.is_sponsored() {
            return Status::Draft;
        }

        let bounds = self.bounds(proposal);

        // Sponsored without any timestamp: nothing shows voting has closed.
        let Some(voting_ends) = bounds.voting_ends else {
            return Status::Voting;
        };
        if now < voting_ends.at {
            return Status::Voting;
        }

        if let Some(grace_ends) = bounds.grace_ends {
            if now < grace_ends.at {
                return Status::GracePeriod;
            }
        }

        if self.quorum().passes(
            proposal.yes_votes,
            proposal.no_votes,
            proposal.total_voting_power,
        ) {
            Status::ReadyForProcessing
        } else {
            Status::Failed
        }
    }

    /// Recorded outcome of a processed proposal: `Passed` when the vote
    /// passed and its actions executed, `Failed` otherwise. `None` for
    /// proposals that have not been processed.
    pub fn verdict(&self, proposal: &Proposal) -> Option<Status> {
        proposal.processing.as_ref().map(|marker| {
            if marker.passed && !marker.action_failed {
                Status::Passed
            } else {
                Status::Failed
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use quorum_types::{
        Address, CancellationMarker, DaoId, ProcessingMarker, ProposalId, Sponsorship,
    };

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn deriver(quorum_percent: u8) -> StatusDeriver {
        StatusDeriver::new(GovernanceParams::default().with_quorum_percent(quorum_percent))
    }

    fn sponsored(yes: u128, no: u128, total: u128) -> Proposal {
        let mut p = Proposal::new(
            ProposalId::new("9"),
            DaoId::new("0xdao"),
            Address::new("0xcreator"),
            t0(),
        );
        p.sponsorship = Some(Sponsorship {
            sponsor: Address::new("0xsponsor"),
            sponsor_voting_power: 50,
            sponsored_at: Some(t0()),
        });
        p.voting_starts = Some(t0());
        p.voting_ends = Some(t0() + Duration::hours(72));
        p.grace_ends = Some(t0() + Duration::hours(96));
        p.yes_votes = yes;
        p.no_votes = no;
        p.total_voting_power = total;
        p
    }

    #[test]
    fn unsponsored_is_draft() {
        let p = Proposal::new(
            ProposalId::new("1"),
            DaoId::new("0xdao"),
            Address::new("0xcreator"),
            t0(),
        );
        assert_eq!(deriver(50).derive(&p, t0() + Duration::days(30)), Status::Draft);
    }

    #[test]
    fn walks_through_periods() {
        let d = deriver(50);
        let p = sponsored(60, 0, 100);
        assert_eq!(d.derive(&p, t0() + Duration::hours(1)), Status::Voting);
        assert_eq!(d.derive(&p, t0() + Duration::hours(80)), Status::GracePeriod);
        assert_eq!(
            d.derive(&p, t0() + Duration::hours(96)),
            Status::ReadyForProcessing
        );
    }

    #[test]
    fn ready_state_does_not_expire() {
        let d = deriver(50);
        // Grace bound recorded 24h after creation, before the voting end.
        let mut p = sponsored(60, 0, 100);
        p.grace_ends = Some(t0() + Duration::hours(24));

        assert_eq!(
            d.derive(&p, t0() + Duration::hours(80)),
            Status::ReadyForProcessing
        );
        assert_eq!(
            d.derive(&p, t0() + Duration::hours(200)),
            Status::ReadyForProcessing
        );
    }

    #[test]
    fn ready_after_grace_and_long_after() {
        let d = deriver(50);
        let p = sponsored(60, 0, 100);
        assert_eq!(
            d.derive(&p, t0() + Duration::hours(200)),
            Status::ReadyForProcessing
        );
        assert_eq!(
            d.derive(&p, t0() + Duration::days(365)),
            Status::ReadyForProcessing
        );
    }

    #[test]
    fn failing_tally_is_failed() {
        let d = deriver(50);
        assert_eq!(
            d.derive(&sponsored(40, 0, 100), t0() + Duration::hours(97)),
            Status::Failed
        );
        assert_eq!(
            d.derive(&sponsored(60, 70, 200), t0() + Duration::hours(97)),
            Status::Failed
        );
    }

    #[test]
    fn cancellation_beats_everything() {
        let d = deriver(50);
        let mut p = sponsored(100, 0, 100);
        p.processing = Some(ProcessingMarker {
            at: Some(t0() + Duration::hours(100)),
            by: None,
            tx: None,
            passed: true,
            action_failed: false,
        });
        p.cancellation = Some(CancellationMarker {
            at: None,
            by: None,
            tx: None,
        });
        assert_eq!(d.derive(&p, t0()), Status::Cancelled);
        assert_eq!(d.derive(&p, t0() + Duration::days(10)), Status::Cancelled);
    }

    #[test]
    fn processed_marker_wins_over_time() {
        let d = deriver(50);
        let mut p = sponsored(10, 0, 100);
        p.processing = Some(ProcessingMarker {
            at: Some(t0() + Duration::hours(97)),
            by: None,
            tx: None,
            passed: false,
            action_failed: false,
        });
        assert_eq!(d.derive(&p, t0() + Duration::hours(1)), Status::Processed);
        assert_eq!(d.verdict(&p), Some(Status::Failed));
    }

    #[test]
    fn verdict_reports_passed_only_when_actions_ran() {
        let d = deriver(50);
        let mut p = sponsored(60, 0, 100);
        assert_eq!(d.verdict(&p), None);

        p.processing = Some(ProcessingMarker {
            at: None,
            by: None,
            tx: None,
            passed: true,
            action_failed: false,
        });
        assert_eq!(d.verdict(&p), Some(Status::Passed));

        if let Some(marker) = p.processing.as_mut() {
            marker.action_failed = true;
        }
        assert_eq!(d.verdict(&p), Some(Status::Failed));
    }

    #[test]
    fn computed_bounds_drive_status_when_raw_bounds_missing() {
        let d = deriver(50);
        let mut p = sponsored(60, 0, 100);
        p.voting_ends = None;
        p.grace_ends = None;
        assert_eq!(d.derive(&p, t0() + Duration::hours(71)), Status::Voting);
        assert_eq!(d.derive(&p, t0() + Duration::hours(73)), Status::GracePeriod);
        assert_eq!(
            d.derive(&p, t0() + Duration::hours(97)),
            Status::ReadyForProcessing
        );
    }

    proptest! {
        #[test]
        fn derive_is_deterministic(
            yes in 0u128..1_000,
            no in 0u128..1_000,
            total in 0u128..2_000,
            offset_hours in 0i64..500,
            cancelled in any::<bool>(),
        ) {
            let d = deriver(50);
            let mut p = sponsored(yes, no, total);
            if cancelled {
                p.cancellation = Some(CancellationMarker { at: None, by: None, tx: None });
            }
            let now = t0() + Duration::hours(offset_hours);
            let first = d.derive(&p, now);
            let second = d.derive(&p.clone(), now);
            prop_assert_eq!(first, second);
            if cancelled {
                prop_assert_eq!(first, Status::Cancelled);
            }
        }

        #[test]
        fn ready_is_monotonic_in_time(
            offset_hours in 96i64..10_000,
            later in 0i64..10_000,
        ) {
            let d = deriver(50);
            let p = sponsored(60, 0, 100);
            let now = t0() + Duration::hours(offset_hours);
            prop_assert_eq!(d.derive(&p, now), Status::ReadyForProcessing);
            prop_assert_eq!(
                d.derive(&p, now + Duration::hours(later)),
                Status::ReadyForProcessing
            );
        }
    }
}
