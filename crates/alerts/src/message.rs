//! Alert message templates.

use trendwatch_core::{AlertKind, AlertableToken};

/// Live-stats page for a token address.
fn token_url(address: &str) -> String {
    format!("https://birdeye.so/solana/token/{}", address)
}

/// Format one alert-worthy token as an HTML message block.
///
/// New listings get their own announcement; price moves show the percent
/// change rounded to two decimals, drops as an absolute magnitude.
pub fn format_alert(token: &AlertableToken) -> String {
    let snapshot = &token.snapshot;
    let url = token_url(&snapshot.address);

    match token.kind {
        AlertKind::NewListing => format!(
            "[NEW TRENDING TOKEN]\n\n\
             Token: {}\n\n\
             Price: {}\n\n\
             Address: {}\n\n\
             <a href=\"{}\">Live Stats</a>",
            snapshot.symbol, snapshot.price, snapshot.address, url
        ),
        AlertKind::PriceMove { percent_change } if percent_change > 0.0 => format!(
            "[PRICE RISE ALERT]\n\n\
             \u{1F7E2} \u{25B3} +{:.2}%\n\n\
             Token: {}\n\n\
             Price: {}\n\n\
             Address: {}\n\n\
             <a href=\"{}\">Live Stats</a>",
            percent_change, snapshot.symbol, snapshot.price, snapshot.address, url
        ),
        AlertKind::PriceMove { percent_change } => format!(
            "[PRICE DROP ALERT]\n\n\
             \u{1F534} \u{25BD} -{:.2}%\n\n\
             Token: {}\n\n\
             Price: {}\n\n\
             Address: {}\n\n\
             <a href=\"{}\">Live Stats</a>",
            percent_change.abs(),
            snapshot.symbol,
            snapshot.price,
            snapshot.address,
            url
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trendwatch_core::TokenSnapshot;

    fn alert(kind: AlertKind) -> AlertableToken {
        AlertableToken {
            snapshot: TokenSnapshot::new("WIF", "addr-wif", 2.4, 900_000.0),
            kind,
        }
    }

    #[test]
    fn new_listing_template() {
        let text = format_alert(&alert(AlertKind::NewListing));
        assert!(text.starts_with("[NEW TRENDING TOKEN]"));
        assert!(text.contains("Token: WIF"));
        assert!(text.contains("Address: addr-wif"));
        assert!(text.contains("<a href=\"https://birdeye.so/solana/token/addr-wif\">Live Stats</a>"));
    }

    #[test]
    fn rise_template_rounds_to_two_decimals() {
        let text = format_alert(&alert(AlertKind::PriceMove {
            percent_change: 3.899999,
        }));
        assert!(text.starts_with("[PRICE RISE ALERT]"));
        assert!(text.contains("+3.90%"));
    }

    #[test]
    fn drop_template_shows_absolute_magnitude() {
        let text = format_alert(&alert(AlertKind::PriceMove {
            percent_change: -3.9,
        }));
        assert!(text.starts_with("[PRICE DROP ALERT]"));
        assert!(text.contains("-3.90%"));
        assert!(!text.contains("--"));
    }

    #[test]
    fn zero_percent_move_formats_as_drop() {
        let text = format_alert(&alert(AlertKind::PriceMove {
            percent_change: 0.0,
        }));
        assert_eq!(&text[..18], "[PRICE DROP ALERT]");
    }
}
