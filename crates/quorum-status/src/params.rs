use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Governance parameters of a DAO that status derivation depends on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Length of the voting period in seconds (default: 72h)
    #[serde(default = "default_voting_period")]
    pub voting_period_secs: u64,

    /// Length of the grace period in seconds (default: 24h)
    #[serde(default = "default_grace_period")]
    pub grace_period_secs: u64,

    /// Share of the total voting power that must vote yes (default: 20)
    #[serde(default = "default_quorum_percent")]
    pub quorum_percent: u8,

    /// Whether yes votes must also outnumber no votes (default: true)
    #[serde(default = "default_true")]
    pub require_majority: bool,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_period_secs: default_voting_period(),
            grace_period_secs: default_grace_period(),
            quorum_percent: default_quorum_percent(),
            require_majority: true,
        }
    }
}

impl GovernanceParams {
    pub fn voting_period(&self) -> Duration {
        Duration::seconds(clamp_secs(self.voting_period_secs))
    }

    pub fn grace_period(&self) -> Duration {
        Duration::seconds(clamp_secs(self.grace_period_secs))
    }

    pub fn with_quorum_percent(mut self, quorum_percent: u8) -> Self {
        self.quorum_percent = quorum_percent;
        self
    }

    pub fn with_periods(mut self, voting: Duration, grace: Duration) -> Self {
        self.voting_period_secs = voting.num_seconds().max(0) as u64;
        self.grace_period_secs = grace.num_seconds().max(0) as u64;
        self
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.quorum_percent > 100 {
            return Err(ParamsError::QuorumOutOfRange(self.quorum_percent));
        }
        if self.voting_period_secs == 0 {
            return Err(ParamsError::EmptyVotingPeriod);
        }
        Ok(())
    }
}

// chrono durations hold at most i64::MAX milliseconds
fn clamp_secs(secs: u64) -> i64 {
    secs.min((i64::MAX / 1_000) as u64) as i64
}

fn default_voting_period() -> u64 {
    72 * 60 * 60
}

fn default_grace_period() -> u64 {
    24 * 60 * 60
}

fn default_quorum_percent() -> u8 {
    20
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = GovernanceParams::default();
        assert_eq!(params.voting_period(), Duration::hours(72));
        assert_eq!(params.grace_period(), Duration::hours(24));
        assert_eq!(params.quorum_percent, 20);
        assert!(params.require_majority);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: GovernanceParams = serde_json::from_str(r#"{"quorum_percent": 50}"#).unwrap();
        assert_eq!(params.quorum_percent, 50);
        assert_eq!(params.voting_period_secs, 72 * 60 * 60);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let params = GovernanceParams::default().with_quorum_percent(101);
        assert_eq!(params.validate(), Err(ParamsError::QuorumOutOfRange(101)));

        let params = GovernanceParams {
            voting_period_secs: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::EmptyVotingPeriod));
    }
}
