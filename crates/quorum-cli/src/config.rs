//! Configuration for quorumctl

use quorum_lifecycle::{GasPolicy, PollConfig, SubmissionConfig};
use quorum_status::GovernanceParams;
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuorumConfig {
    /// Governance parameters used for status derivation
    #[serde(default)]
    pub governance: GovernanceParams,

    /// Index polling budget
    #[serde(default)]
    pub poll: PollConfig,

    /// Ledger call timeouts
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Gas ceiling policy for processing
    #[serde(default)]
    pub gas: GasPolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,

    /// Include timestamps
    #[serde(default = "default_true")]
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            timestamps: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl QuorumConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `QUORUM_`-prefixed environment variables (`QUORUM_POLL__MAX_ATTEMPTS=5`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&QuorumConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("QUORUM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: QuorumConfig = builder.build()?.try_deserialize()?;
        config
            .governance
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(config)
    }
}
