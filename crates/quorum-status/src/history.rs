use chrono::{DateTime, Utc};
use quorum_types::{HistoryElement, HistoryKind, HistoryPayload, Proposal};

use crate::deriver::StatusDeriver;
use crate::params::GovernanceParams;
use crate::periods::Bound;

/// Rebuilds a proposal's timeline from its raw fields.
///
/// The timeline is rebuilt from scratch on every refresh; elements are
/// never patched in place. Milestones whose raw markers are absent are
/// omitted rather than reported as errors.
#[derive(Clone, Debug, Default)]
pub struct HistoryReconstructor {
    deriver: StatusDeriver,
}

impl HistoryReconstructor {
    pub fn new(params: GovernanceParams) -> Self {
        Self {
            deriver: StatusDeriver::new(params),
        }
    }

    /// Every milestone the raw fields show, ordered by key.
    ///
    /// Period boundaries are included once the proposal is sponsored, even
    /// when they lie in the future; see [`HistoryReconstructor::build_until`].
    pub fn build(&self, proposal: &Proposal) -> Vec<HistoryElement> {
        let mut elements = Vec::with_capacity(6);

        elements.push(HistoryElement::new(
            proposal.created_at,
            HistoryKind::Created,
            HistoryPayload {
                title: "Proposal Created".into(),
                description: format!("Submitted by {}", proposal.created_by),
                actor: Some(proposal.created_by.clone()),
                tx: None,
                derived: false,
            },
        ));

        if let Some(sponsorship) = &proposal.sponsorship {
            let (at, derived) = match sponsorship.sponsored_at.or(proposal.voting_starts) {
                Some(at) => (at, false),
                None => (proposal.created_at, true),
            };
            elements.push(HistoryElement::new(
                at,
                HistoryKind::Sponsored,
                HistoryPayload {
                    title: "Sponsored".into(),
                    description: format!("Sponsored by {}", sponsorship.sponsor),
                    actor: Some(sponsorship.sponsor.clone()),
                    tx: None,
                    derived,
                },
            ));
        }

        let bounds = self.deriver.bounds(proposal);
        let cancelled_at = proposal.cancellation.as_ref().map(|marker| marker.at);

        // A cancelled proposal only crossed the boundaries it reached before
        // cancellation; without a cancellation time none are known.
        let crossed = |bound: &Bound| match cancelled_at {
            None => true,
            Some(Some(at)) => bound.at <= at,
            Some(None) => false,
        };

        if let Some(bound) = bounds.voting_ends.filter(|bound| crossed(bound)) {
            elements.push(HistoryElement::new(
                bound.at,
                HistoryKind::VotingEnded,
                HistoryPayload {
                    title: "Voting Period Ended".into(),
                    description: format!(
                        "Yes: {}, No: {}",
                        proposal.yes_votes, proposal.no_votes
                    ),
                    actor: None,
                    tx: None,
                    derived: bound.derived,
                },
            ));
        }

        if let Some(bound) = bounds.grace_ends.filter(|bound| crossed(bound)) {
            elements.push(HistoryElement::new(
                bound.at,
                HistoryKind::GraceEnded,
                HistoryPayload {
                    title: "Grace Period Ended".into(),
                    description: "Ready for execution once the vote passed".into(),
                    actor: None,
                    tx: None,
                    derived: bound.derived,
                },
            ));
        }

        if let Some(marker) = &proposal.cancellation {
            let (at, derived) = resolve_at(marker.at, &elements);
            elements.push(HistoryElement::new(
                at,
                HistoryKind::Cancelled,
                HistoryPayload {
                    title: "Cancelled".into(),
                    description: match &marker.by {
                        Some(by) => format!("Cancelled by {by}"),
                        None => "Proposal cancelled".into(),
                    },
                    actor: marker.by.clone(),
                    tx: marker.tx.clone(),
                    derived,
                },
            ));
        }

        if let Some(marker) = &proposal.processing {
            let (at, derived) = resolve_at(marker.at, &elements);
            let description = match self.deriver.verdict(proposal) {
                Some(status) if marker.action_failed => {
                    format!("Processed as {status}: actions reverted")
                }
                Some(status) => format!("Processed as {status}"),
                None => "Processed".into(),
            };
            elements.push(HistoryElement::new(
                at,
                HistoryKind::Processed,
                HistoryPayload {
                    title: "Executed".into(),
                    description,
                    actor: marker.by.clone(),
                    tx: marker.tx.clone(),
                    derived,
                },
            ));
        }

        elements.sort_by_key(HistoryElement::key);
        elements
    }

    /// Like [`HistoryReconstructor::build`], without period boundaries that
    /// have not been crossed at `now`.
    pub fn build_until(&self, proposal: &Proposal, now: DateTime<Utc>) -> Vec<HistoryElement> {
        self.build(proposal)
            .into_iter()
            .filter(|element| match element.kind() {
                HistoryKind::VotingEnded | HistoryKind::GraceEnded => element.at() <= now,
                _ => true,
            })
            .collect()
    }
}

// Markers without a timestamp sort after the latest known milestone.
fn resolve_at(at: Option<DateTime<Utc>>, so_far: &[HistoryElement]) -> (DateTime<Utc>, bool) {
    match at {
        Some(at) => (at, false),
        None => {
            let latest = so_far
                .iter()
                .map(HistoryElement::at)
                .max()
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            (latest, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use quorum_types::{
        Address, CancellationMarker, DaoId, ProcessingMarker, ProposalId, Sponsorship,
        SubmissionHandle,
    };

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
    }

    fn draft() -> Proposal {
        Proposal::new(
            ProposalId::new("5"),
            DaoId::new("0xdao"),
            Address::new("0xcreator"),
            t0(),
        )
    }

    fn sponsored() -> Proposal {
        let mut p = draft();
        p.sponsorship = Some(Sponsorship {
            sponsor: Address::new("0xsponsor"),
            sponsor_voting_power: 10,
            sponsored_at: Some(t0() + Duration::hours(1)),
        });
        p.yes_votes = 60;
        p.total_voting_power = 100;
        p
    }

    fn kinds(elements: &[HistoryElement]) -> Vec<HistoryKind> {
        elements.iter().map(HistoryElement::kind).collect()
    }

    #[test]
    fn draft_has_only_creation() {
        let history = HistoryReconstructor::default().build(&draft());
        assert_eq!(kinds(&history), vec![HistoryKind::Created]);
        assert_eq!(history[0].payload().actor, Some(Address::new("0xcreator")));
    }

    #[test]
    fn sponsored_includes_computed_boundaries() {
        let history = HistoryReconstructor::default().build(&sponsored());
        assert_eq!(
            kinds(&history),
            vec![
                HistoryKind::Created,
                HistoryKind::Sponsored,
                HistoryKind::VotingEnded,
                HistoryKind::GraceEnded,
            ]
        );
        let voting_ended = &history[2];
        assert_eq!(voting_ended.at(), t0() + Duration::hours(73));
        assert!(voting_ended.payload().derived);
    }

    #[test]
    fn build_until_drops_future_boundaries() {
        let reconstructor = HistoryReconstructor::default();
        let p = sponsored();
        let during_voting = reconstructor.build_until(&p, t0() + Duration::hours(2));
        assert_eq!(
            kinds(&during_voting),
            vec![HistoryKind::Created, HistoryKind::Sponsored]
        );
        let in_grace = reconstructor.build_until(&p, t0() + Duration::hours(80));
        assert_eq!(in_grace.len(), 3);
    }

    #[test]
    fn cancellation_during_voting_omits_boundaries() {
        let mut p = sponsored();
        p.cancellation = Some(CancellationMarker {
            at: Some(t0() + Duration::hours(5)),
            by: Some(Address::new("0xcreator")),
            tx: Some(SubmissionHandle::new("0xc4c3")),
        });
        let history = HistoryReconstructor::default().build(&p);
        assert_eq!(
            kinds(&history),
            vec![
                HistoryKind::Created,
                HistoryKind::Sponsored,
                HistoryKind::Cancelled
            ]
        );
        assert_eq!(history[2].payload().tx, Some(SubmissionHandle::new("0xc4c3")));
    }

    #[test]
    fn untimed_markers_sort_last() {
        let mut p = sponsored();
        p.processing = Some(ProcessingMarker {
            at: None,
            by: None,
            tx: None,
            passed: true,
            action_failed: false,
        });
        let history = HistoryReconstructor::default().build(&p);
        let last = history.last().unwrap();
        assert_eq!(last.kind(), HistoryKind::Processed);
        assert!(last.payload().derived);
        assert_eq!(last.payload().description, "Processed as Passed");
    }

    #[test]
    fn rebuild_is_identical() {
        let reconstructor = HistoryReconstructor::default();
        let p = sponsored();
        assert_eq!(reconstructor.build(&p), reconstructor.build(&p));
    }

    fn arb_proposal() -> impl Strategy<Value = Proposal> {
        (
            proptest::option::of(0i64..500),
            proptest::option::of(proptest::option::of(0i64..500)),
            proptest::option::of(proptest::option::of(0i64..500)),
            proptest::option::of(0i64..500),
            proptest::option::of(0i64..500),
        )
            .prop_map(|(sponsored_h, cancelled_h, processed_h, voting_end_h, grace_end_h)| {
                let mut p = draft();
                let at = |h: i64| t0() + Duration::hours(h);
                if let Some(h) = sponsored_h {
                    p.sponsorship = Some(Sponsorship {
                        sponsor: Address::new("0xsponsor"),
                        sponsor_voting_power: 1,
                        sponsored_at: Some(at(h)),
                    });
                }
                p.voting_ends = voting_end_h.map(at);
                p.grace_ends = grace_end_h.map(at);
                if let Some(cancel) = cancelled_h {
                    p.cancellation = Some(CancellationMarker {
                        at: cancel.map(at),
                        by: None,
                        tx: None,
                    });
                }
                if let Some(process) = processed_h {
                    p.processing = Some(ProcessingMarker {
                        at: process.map(at),
                        by: None,
                        tx: None,
                        passed: true,
                        action_failed: false,
                    });
                }
                p
            })
    }

    proptest! {
        #[test]
        fn output_is_non_decreasing_and_omits_absent_markers(p in arb_proposal()) {
            let history = HistoryReconstructor::default().build(&p);
            for pair in history.windows(2) {
                prop_assert!(pair[0].key() <= pair[1].key());
            }
            let ks = kinds(&history);
            prop_assert_eq!(ks[0], HistoryKind::Created);
            prop_assert_eq!(ks.contains(&HistoryKind::Sponsored), p.sponsorship.is_some());
            prop_assert_eq!(ks.contains(&HistoryKind::Cancelled), p.cancellation.is_some());
            prop_assert_eq!(ks.contains(&HistoryKind::Processed), p.processing.is_some());
            if p.sponsorship.is_none() {
                prop_assert!(!ks.contains(&HistoryKind::VotingEnded));
                prop_assert!(!ks.contains(&HistoryKind::GraceEnded));
            }
        }
    }
}
