use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{Address, SubmissionHandle};

/// Milestones a proposal can reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Created,
    Sponsored,
    VotingEnded,
    GraceEnded,
    Cancelled,
    Processed,
}

impl HistoryKind {
    /// Stable tiebreak for milestones sharing a timestamp, in lifecycle order.
    pub fn rank(self) -> u8 {
        match self {
            HistoryKind::Created => 0,
            HistoryKind::Sponsored => 1,
            HistoryKind::VotingEnded => 2,
            HistoryKind::GraceEnded => 3,
            HistoryKind::Cancelled => 4,
            HistoryKind::Processed => 5,
        }
    }
}

/// Ordering key of a timeline element. Compares by timestamp, then tiebreak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderingKey {
    pub at: DateTime<Utc>,
    pub tiebreak: u8,
}

/// Display payload of a timeline element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub actor: Option<Address>,
    #[serde(default)]
    pub tx: Option<SubmissionHandle>,
    /// True when the timestamp was computed rather than recorded
    #[serde(default)]
    pub derived: bool,
}

/// One entry of a proposal timeline. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryElement {
    key: OrderingKey,
    kind: HistoryKind,
    payload: HistoryPayload,
}

impl HistoryElement {
    pub fn new(at: DateTime<Utc>, kind: HistoryKind, payload: HistoryPayload) -> Self {
        Self {
            key: OrderingKey {
                at,
                tiebreak: kind.rank(),
            },
            kind,
            payload,
        }
    }

    pub fn key(&self) -> OrderingKey {
        self.key
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.key.at
    }

    pub fn kind(&self) -> HistoryKind {
        self.kind
    }

    pub fn payload(&self) -> &HistoryPayload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload(title: &str) -> HistoryPayload {
        HistoryPayload {
            title: title.into(),
            description: String::new(),
            actor: None,
            tx: None,
            derived: false,
        }
    }

    #[test]
    fn keys_break_ties_by_lifecycle_rank() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let created = HistoryElement::new(at, HistoryKind::Created, payload("Created"));
        let sponsored = HistoryElement::new(at, HistoryKind::Sponsored, payload("Sponsored"));
        assert!(created.key() < sponsored.key());
    }

    #[test]
    fn timestamp_dominates_rank() {
        let early = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let processed = HistoryElement::new(early, HistoryKind::Processed, payload("P"));
        let created = HistoryElement::new(late, HistoryKind::Created, payload("C"));
        assert!(processed.key() < created.key());
    }
}
