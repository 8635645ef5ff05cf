//! Read-path logic for Quorum: proposal status derivation and timelines.
//!
//! Everything in this crate is a pure function of raw proposal fields,
//! governance parameters and (where stated) the current instant. The gate,
//! the lifecycle poller and read views all call into it redundantly, so two
//! callers holding the same raw fields and the same instant always agree.
//!
//! ## Status priority
//!
//! 1. **Cancelled**: a cancellation marker is present
//! 2. **Processed**: a processing marker is present
//! 3. **Draft**: nobody has sponsored the proposal yet
//! 4. **Voting**: before the voting-period end
//! 5. **GracePeriod**: before the grace-period end
//! 6. **ReadyForProcessing** / **Failed**: by the quorum rule

pub mod deriver;
pub mod error;
pub mod history;
pub mod params;
pub mod periods;
pub mod quorum;
pub mod tally;

pub use deriver::StatusDeriver;
pub use error::ParamsError;
pub use history::HistoryReconstructor;
pub use params::GovernanceParams;
pub use periods::{Bound, PeriodBounds};
pub use quorum::QuorumRule;
pub use tally::{percent_no, percent_yes};
