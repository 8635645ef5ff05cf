use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal, derived from raw fields and the current time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Submitted but not yet sponsored; voting has not opened
    Draft,
    Voting,
    GracePeriod,
    /// Vote passed and grace elapsed; awaiting execution on the ledger
    ReadyForProcessing,
    /// Processed and passed (reported as a verdict)
    Passed,
    Failed,
    Cancelled,
    Processed,
}

impl Status {
    /// Whether no further ledger operation can change this status.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            Status::Passed | Status::Failed | Status::Cancelled | Status::Processed
        )
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Draft => "Unsponsored",
            Status::Voting => "Voting",
            Status::GracePeriod => "Grace Period",
            Status::ReadyForProcessing => "Ready for Execution",
            Status::Passed => "Passed",
            Status::Failed => "Failed",
            Status::Cancelled => "Cancelled",
            Status::Processed => "Processed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
