use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Index polling budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Maximum number of index reads (default: 20)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between reads in milliseconds (default: 2000)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Wall-clock budget in milliseconds (default: 60000)
    #[serde(default = "default_max_elapsed_ms")]
    pub max_elapsed_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
            max_elapsed_ms: default_max_elapsed_ms(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_millis(self.max_elapsed_ms)
    }
}

/// Timeouts around the ledger calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// How long the ledger may take to accept a request (default: 120s,
    /// covers the signer prompt)
    #[serde(default = "default_ack_timeout_ms")]
    pub ack_timeout_ms: u64,

    /// How long inclusion may take once accepted (default: 300s)
    #[serde(default = "default_confirmation_timeout_ms")]
    pub confirmation_timeout_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            ack_timeout_ms: default_ack_timeout_ms(),
            confirmation_timeout_ms: default_confirmation_timeout_ms(),
        }
    }
}

impl SubmissionConfig {
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }
}

fn default_max_attempts() -> u32 {
    20
}

fn default_interval_ms() -> u64 {
    2_000
}

fn default_max_elapsed_ms() -> u64 {
    60_000
}

fn default_ack_timeout_ms() -> u64 {
    120_000
}

fn default_confirmation_timeout_ms() -> u64 {
    300_000
}
