use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{Address, DaoId, ProposalId, SubmissionHandle};

/// Raw proposal fields as read from the index.
///
/// Owned by the external data layer; the orchestration core only reads it.
/// The lifecycle status is never stored here; it is recomputed from these
/// fields and the current time on every read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub dao_id: DaoId,
    #[serde(default)]
    pub title: Option<String>,
    pub created_by: Address,
    pub created_at: DateTime<Utc>,
    /// Set once a member with enough voting power sponsors the proposal
    #[serde(default)]
    pub sponsorship: Option<Sponsorship>,
    #[serde(default)]
    pub voting_starts: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voting_ends: Option<DateTime<Utc>>,
    #[serde(default)]
    pub grace_ends: Option<DateTime<Utc>>,
    #[serde(default)]
    pub yes_votes: u128,
    #[serde(default)]
    pub no_votes: u128,
    /// Total voting power snapshotted when voting opened
    #[serde(default)]
    pub total_voting_power: u128,
    /// Proposal that must settle on the ledger before this one can be processed
    #[serde(default)]
    pub prev_proposal_id: Option<ProposalId>,
    #[serde(default)]
    pub cancellation: Option<CancellationMarker>,
    #[serde(default)]
    pub processing: Option<ProcessingMarker>,
    /// Gas the proposal's actions are estimated to consume when executed
    #[serde(default)]
    pub action_gas_estimate: u64,
    /// Encoded action payload, passed back verbatim when processing
    #[serde(default)]
    pub proposal_data: String,
}

/// Who sponsored a proposal, and with how much voting power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsorship {
    pub sponsor: Address,
    /// The sponsor's current voting power, as last indexed
    pub sponsor_voting_power: u128,
    #[serde(default)]
    pub sponsored_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationMarker {
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub by: Option<Address>,
    #[serde(default)]
    pub tx: Option<SubmissionHandle>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingMarker {
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub by: Option<Address>,
    #[serde(default)]
    pub tx: Option<SubmissionHandle>,
    /// Whether the ledger recorded the vote as passed at processing time
    pub passed: bool,
    /// Whether the proposal's actions reverted during execution
    #[serde(default)]
    pub action_failed: bool,
}

impl Proposal {
    /// Create an unsponsored proposal with empty tallies.
    pub fn new(
        id: ProposalId,
        dao_id: DaoId,
        created_by: Address,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            dao_id,
            title: None,
            created_by,
            created_at,
            sponsorship: None,
            voting_starts: None,
            voting_ends: None,
            grace_ends: None,
            yes_votes: 0,
            no_votes: 0,
            total_voting_power: 0,
            prev_proposal_id: None,
            cancellation: None,
            processing: None,
            action_gas_estimate: 0,
            proposal_data: String::new(),
        }
    }

    pub fn is_sponsored(&self) -> bool {
        self.sponsorship.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_some()
    }

    pub fn is_processed(&self) -> bool {
        self.processing.is_some()
    }

    /// Instant voting opened: the explicit bound, else the sponsorship time.
    pub fn voting_opened_at(&self) -> Option<DateTime<Utc>> {
        self.voting_starts.or_else(|| {
            self.sponsorship
                .as_ref()
                .and_then(|sponsorship| sponsorship.sponsored_at)
        })
    }
}
