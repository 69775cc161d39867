//! Liquidity-tiered alert thresholds.

/// Liquidity tier boundaries in USD.
pub const TIER_HIGH: f64 = 5_000_000.0;
pub const TIER_MID: f64 = 500_000.0;
pub const TIER_LOW: f64 = 50_000.0;

/// Percent-change threshold for a token at the given liquidity.
///
/// Deeper pools move less on real flow, so the most liquid tier alerts on
/// the smallest move. Tier boundaries are inclusive at the lower edge.
pub fn alert_threshold(liquidity: f64) -> f64 {
    if liquidity >= TIER_HIGH {
        0.4
    } else if liquidity >= TIER_MID {
        1.0
    } else if liquidity >= TIER_LOW {
        2.0
    } else {
        6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(alert_threshold(5_000_000.0), 0.4);
        assert_eq!(alert_threshold(500_000.0), 1.0);
        assert_eq!(alert_threshold(50_000.0), 2.0);
        assert_eq!(alert_threshold(49_999.99), 6.0);
    }

    #[test]
    fn interior_values_pick_surrounding_tier() {
        assert_eq!(alert_threshold(12_000_000.0), 0.4);
        assert_eq!(alert_threshold(1_000_000.0), 1.0);
        assert_eq!(alert_threshold(100_000.0), 2.0);
        assert_eq!(alert_threshold(0.0), 6.0);
    }
}
