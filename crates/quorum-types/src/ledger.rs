use serde::{Deserialize, Serialize};

/// Proposal state as reported by the ledger itself, independent of the index.
///
/// The numeric codes are the ledger contract's own enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerProposalState {
    Unborn,
    Submitted,
    Voting,
    Cancelled,
    Grace,
    Ready,
    Processed,
    Defeated,
    Unknown(u8),
}

impl LedgerProposalState {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => LedgerProposalState::Unborn,
            1 => LedgerProposalState::Submitted,
            2 => LedgerProposalState::Voting,
            3 => LedgerProposalState::Cancelled,
            4 => LedgerProposalState::Grace,
            5 => LedgerProposalState::Ready,
            6 => LedgerProposalState::Processed,
            7 => LedgerProposalState::Defeated,
            other => LedgerProposalState::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            LedgerProposalState::Unborn => 0,
            LedgerProposalState::Submitted => 1,
            LedgerProposalState::Voting => 2,
            LedgerProposalState::Cancelled => 3,
            LedgerProposalState::Grace => 4,
            LedgerProposalState::Ready => 5,
            LedgerProposalState::Processed => 6,
            LedgerProposalState::Defeated => 7,
            LedgerProposalState::Unknown(code) => code,
        }
    }

    /// Whether a later proposal may be processed after one in this state.
    ///
    /// Eligible codes: 0 (unborn), 3 (cancelled), 6 (processed), 7 (defeated).
    pub fn unblocks_successor(self) -> bool {
        matches!(
            self,
            LedgerProposalState::Unborn
                | LedgerProposalState::Cancelled
                | LedgerProposalState::Processed
                | LedgerProposalState::Defeated
        )
    }
}
