//! Action Gate: eligibility checks in front of every ledger operation.
//!
//! A gate evaluation never performs I/O. Callers resolve each predicate
//! (network, status, permissions, ledger-side ordering) into a [`GateRule`]
//! first, then hand the ordered rule set to [`ActionGate::evaluate`]. All
//! rules are evaluated; the first denial in declaration order is the
//! headline reason shown to the user.
//!
//! ## Rule order for the standard sets
//!
//! 1. **Network**: caller connected to the DAO's chain
//! 2. **In flight**: no run of the same kind pending for this actor and target
//! 3. **Status**: derived proposal status permits the operation
//! 4. **Kind-specific**: cancel permission, prior proposal settled on the ledger
//!
//! The [`InFlightRegistry`] backs rule 2 and is also the race-proof guard the
//! lifecycle coordinator registers with before submitting.

pub mod error;
pub mod gate;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod standard;

pub use error::RegistryError;
pub use gate::{ActionGate, Decision};
pub use registry::{InFlightGuard, InFlightKey, InFlightRegistry};
pub use rule::GateRule;
pub use rules::{CallerContext, PriorProposalCheck};
pub use standard::StandardRules;
