use serde::{Deserialize, Serialize};

use crate::params::GovernanceParams;

/// Quorum and majority rule applied once voting and grace have elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumRule {
    pub quorum_percent: u8,
    pub require_majority: bool,
}

impl QuorumRule {
    pub fn new(quorum_percent: u8, require_majority: bool) -> Self {
        Self {
            quorum_percent,
            require_majority,
        }
    }

    /// Whether the tallies pass against the total voting power snapshot.
    ///
    /// A zero snapshot never passes.
    pub fn passes(&self, yes: u128, no: u128, total: u128) -> bool {
        if total == 0 {
            return false;
        }
        if self.require_majority && yes <= no {
            return false;
        }
        meets_quorum(yes, total, self.quorum_percent)
    }
}

impl From<&GovernanceParams> for QuorumRule {
    fn from(params: &GovernanceParams) -> Self {
        Self::new(params.quorum_percent, params.require_majority)
    }
}

// yes / total >= quorum / 100, without overflowing for large tallies
fn meets_quorum(yes: u128, total: u128, quorum_percent: u8) -> bool {
    let quorum = u128::from(quorum_percent);
    match (yes.checked_mul(100), total.checked_mul(quorum)) {
        (Some(lhs), Some(rhs)) => lhs >= rhs,
        _ => yes >= total || yes / (total / 100).max(1) >= quorum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_of_hundred_passes_half_quorum() {
        let rule = QuorumRule::new(50, true);
        assert!(rule.passes(60, 0, 100));
    }

    #[test]
    fn below_quorum_fails() {
        let rule = QuorumRule::new(50, true);
        assert!(!rule.passes(49, 0, 100));
        assert!(rule.passes(50, 0, 100));
    }

    #[test]
    fn majority_required() {
        let rule = QuorumRule::new(10, true);
        assert!(!rule.passes(30, 30, 100));
        assert!(!rule.passes(30, 40, 100));

        let lenient = QuorumRule::new(10, false);
        assert!(lenient.passes(30, 40, 100));
    }

    #[test]
    fn zero_snapshot_never_passes() {
        let rule = QuorumRule::new(0, false);
        assert!(!rule.passes(0, 0, 0));
        assert!(!rule.passes(10, 0, 0));
    }

    #[test]
    fn zero_quorum_needs_only_majority() {
        let rule = QuorumRule::new(0, true);
        assert!(rule.passes(1, 0, 1_000));
        assert!(!rule.passes(0, 0, 1_000));
    }

    #[test]
    fn huge_tallies_do_not_overflow() {
        let rule = QuorumRule::new(50, true);
        let total = u128::MAX / 2;
        assert!(rule.passes(total / 2 + total / 10, 0, total));
        assert!(!rule.passes(total / 10, 0, total));
    }
}
