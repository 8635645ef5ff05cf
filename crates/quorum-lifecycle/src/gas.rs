use serde::{Deserialize, Serialize};

/// Gas ceiling policy for processing proposals.
///
/// The limit is `(estimate + buffer) * multiplier_percent / 100`, rounded up.
/// Proposals without an estimate get `default_limit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPolicy {
    /// Gas added to the action estimate for the processing call itself
    #[serde(default = "default_buffer")]
    pub buffer: u64,

    /// Safety multiplier in percent (default: 160)
    #[serde(default = "default_multiplier_percent")]
    pub multiplier_percent: u64,

    #[serde(default = "default_limit")]
    pub default_limit: u64,
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self {
            buffer: default_buffer(),
            multiplier_percent: default_multiplier_percent(),
            default_limit: default_limit(),
        }
    }
}

impl GasPolicy {
    pub fn processing_gas_limit(&self, action_gas_estimate: u64) -> u64 {
        if action_gas_estimate == 0 {
            return self.default_limit;
        }
        let padded = u128::from(action_gas_estimate) + u128::from(self.buffer);
        padded
            .checked_mul(u128::from(self.multiplier_percent))
            .and_then(|scaled| u64::try_from(scaled.div_ceil(100)).ok())
            .unwrap_or(u64::MAX)
    }
}

fn default_buffer() -> u64 {
    150_000
}

fn default_multiplier_percent() -> u64 {
    160
}

fn default_limit() -> u64 {
    2_000_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_estimate_uses_default() {
        assert_eq!(GasPolicy::default().processing_gas_limit(0), 2_000_000);
    }

    #[test]
    fn estimate_is_buffered_and_scaled() {
        let policy = GasPolicy::default();
        assert_eq!(policy.processing_gas_limit(250_000), 640_000);
        assert_eq!(policy.processing_gas_limit(1), 240_002);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(GasPolicy::default().processing_gas_limit(u64::MAX), u64::MAX);
    }

    #[test]
    fn oversized_multiplier_saturates() {
        let policy = GasPolicy {
            multiplier_percent: u64::MAX,
            ..GasPolicy::default()
        };
        assert_eq!(policy.processing_gas_limit(u64::MAX), u64::MAX);
        assert_eq!(policy.processing_gas_limit(1), u64::MAX);
    }

    proptest! {
        #[test]
        fn limit_covers_estimate(estimate in 1u64..10_000_000_000) {
            let limit = GasPolicy::default().processing_gas_limit(estimate);
            prop_assert!(limit >= estimate + 150_000);
        }
    }
}
