use thiserror::Error;

/// Errors from validating governance parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("quorum percent must be within 0..=100, got {0}")]
    QuorumOutOfRange(u8),

    #[error("voting period must be longer than zero seconds")]
    EmptyVotingPeriod,
}
