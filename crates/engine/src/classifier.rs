//! Alert-worthiness classification.

use tracing::info;
use trendwatch_core::{alert_threshold, AlertKind, AlertableToken, ChangeRecord};

/// Decide which change records deserve an alert.
///
/// Unseen tokens are always alert-worthy as new listings. Changed tokens
/// are measured by percent change against the stored price, thresholded by
/// the current snapshot's liquidity tier; a move exactly at the threshold
/// counts. A stored price of exactly zero carries no usable baseline, so
/// that token is announced as a new listing instead of dividing by it.
///
/// Output order matches input order; non-worthy records are dropped here
/// but still persisted by the caller.
pub fn classify(records: &[ChangeRecord]) -> Vec<AlertableToken> {
    let mut worthy = Vec::new();

    for record in records {
        let stored = match &record.stored {
            None => {
                worthy.push(AlertableToken {
                    snapshot: record.snapshot.clone(),
                    kind: AlertKind::NewListing,
                });
                continue;
            }
            Some(stored) => stored,
        };

        if stored.price == 0.0 {
            worthy.push(AlertableToken {
                snapshot: record.snapshot.clone(),
                kind: AlertKind::NewListing,
            });
            continue;
        }

        let percent_change = (record.snapshot.price - stored.price) / stored.price * 100.0;
        let threshold = alert_threshold(record.snapshot.liquidity);

        if percent_change.abs() >= threshold {
            worthy.push(AlertableToken {
                snapshot: record.snapshot.clone(),
                kind: AlertKind::PriceMove { percent_change },
            });
        }
    }

    info!("Found a total of {} alert-worthy tokens", worthy.len());
    worthy
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use trendwatch_core::{StoredToken, TokenSnapshot};

    fn changed(price: f64, stored_price: f64, liquidity: f64) -> ChangeRecord {
        ChangeRecord {
            snapshot: TokenSnapshot::new("TOK", "addr-tok", price, liquidity),
            stored: Some(StoredToken {
                symbol: "TOK".into(),
                address: "addr-tok".to_string(),
                logo_uri: String::new(),
                price: stored_price,
                liquidity,
                last_updated: Utc::now(),
            }),
        }
    }

    fn unseen(price: f64, liquidity: f64) -> ChangeRecord {
        ChangeRecord {
            snapshot: TokenSnapshot::new("TOK", "addr-tok", price, liquidity),
            stored: None,
        }
    }

    #[test]
    fn unseen_is_always_a_new_listing() {
        for (price, liquidity) in [(0.0, 0.0), (1.0, 10.0), (500.0, 9_000_000.0)] {
            let worthy = classify(&[unseen(price, liquidity)]);
            assert_eq!(worthy.len(), 1);
            assert_eq!(worthy[0].kind, AlertKind::NewListing);
        }
    }

    #[test]
    fn move_above_tier_threshold_is_worthy() {
        // 1,000,000 liquidity -> 1% threshold; 10 -> 10.39 is a 3.9% move.
        let worthy = classify(&[changed(10.39, 10.0, 1_000_000.0)]);

        assert_eq!(worthy.len(), 1);
        match worthy[0].kind {
            AlertKind::PriceMove { percent_change } => {
                assert!((percent_change - 3.9).abs() < 1e-9);
            }
            AlertKind::NewListing => panic!("expected a price move"),
        }
    }

    #[test]
    fn move_below_tier_threshold_is_dropped() {
        // 0.5% move under a 1% threshold.
        let worthy = classify(&[changed(10.05, 10.0, 1_000_000.0)]);
        assert!(worthy.is_empty());
    }

    #[test]
    fn move_exactly_at_threshold_counts() {
        // 100,000 liquidity -> 2% threshold; 10 -> 10.20 is exactly 2%.
        let worthy = classify(&[changed(10.20, 10.0, 100_000.0)]);
        assert_eq!(worthy.len(), 1);
    }

    #[test]
    fn negative_moves_use_absolute_magnitude() {
        // -3% move under a 2% threshold is worthy and keeps its sign.
        let worthy = classify(&[changed(9.7, 10.0, 100_000.0)]);

        assert_eq!(worthy.len(), 1);
        match worthy[0].kind {
            AlertKind::PriceMove { percent_change } => assert!(percent_change < 0.0),
            AlertKind::NewListing => panic!("expected a price move"),
        }
    }

    #[test]
    fn zero_stored_price_is_reannounced_as_new() {
        let worthy = classify(&[changed(0.5, 0.0, 1_000_000.0)]);

        assert_eq!(worthy.len(), 1);
        assert_eq!(worthy[0].kind, AlertKind::NewListing);
    }

    #[test]
    fn output_preserves_input_order() {
        let mut a = changed(10.39, 10.0, 1_000_000.0);
        a.snapshot.address = "addr-a".to_string();
        let mut b = unseen(1.0, 10.0);
        b.snapshot.address = "addr-b".to_string();

        let worthy = classify(&[a, b]);
        let order: Vec<&str> = worthy.iter().map(|t| t.snapshot.address.as_str()).collect();
        assert_eq!(order, vec!["addr-a", "addr-b"]);
    }
}
