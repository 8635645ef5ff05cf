use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rule::GateRule;

/// Outcome of a gate evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// True iff every rule was allowed
    pub allowed: bool,
    /// Message of every failing rule, in declaration order
    pub blocking_reasons: Vec<String>,
}

impl Decision {
    /// The headline reason: the first failing rule in declaration order.
    pub fn first_reason(&self) -> Option<&str> {
        self.blocking_reasons.first().map(String::as_str)
    }
}

/// Evaluates an ordered rule set into a [`Decision`].
///
/// Holds no state; every rule is a resolved value supplied by the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionGate;

impl ActionGate {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate every rule. A denial does not short-circuit the remaining
    /// rules, so the decision lists all blocking reasons.
    pub fn evaluate(&self, rules: &[GateRule]) -> Decision {
        let mut blocking_reasons = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            match rule {
                GateRule::Allowed => {
                    debug!(rule = index, "Rule allowed");
                }
                GateRule::Denied(reason) => {
                    debug!(rule = index, reason = %reason, "Rule denied");
                    blocking_reasons.push(reason.clone());
                }
            }
        }

        let decision = Decision {
            allowed: blocking_reasons.is_empty(),
            blocking_reasons,
        };

        if let Some(reason) = decision.first_reason() {
            warn!(
                denied = decision.blocking_reasons.len(),
                total = rules.len(),
                reason = %reason,
                "Action gate denied operation"
            );
        }

        decision
    }
}
