use serde::{Deserialize, Serialize};

/// A resolved eligibility predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum GateRule {
    /// Predicate holds
    Allowed,
    /// Predicate failed, with the message shown to the user
    Denied(String),
}

impl GateRule {
    pub fn denied(reason: impl Into<String>) -> Self {
        GateRule::Denied(reason.into())
    }

    /// `Allowed` when `condition` holds, otherwise denied with `reason`.
    pub fn check(condition: bool, reason: impl Into<String>) -> Self {
        if condition {
            GateRule::Allowed
        } else {
            GateRule::Denied(reason.into())
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GateRule::Allowed)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            GateRule::Allowed => None,
            GateRule::Denied(reason) => Some(reason),
        }
    }
}
