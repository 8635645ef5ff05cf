use thiserror::Error;

use crate::registry::InFlightKey;

/// Errors from the in-flight registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("operation already in flight: {0}")]
    AlreadyInFlight(InFlightKey),
}
