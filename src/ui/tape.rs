//! One-line formatting for the live views: trades on the tape, quotes in
//! the price watch.

use std::cmp::Ordering;

use chrono::Utc;

use super::format::{fmt_change, fmt_mcap, fmt_price, fmt_time, group_thousands, price_text};
use super::sparkline::sparkline;
use super::text::{pad, truncate, Align};
use super::theme::{Intent, Theme};
use crate::data::{Quote, SeriesHistory, Side, TradeEvent};
use crate::live::Tally;

/// Trades at or above this value get the whale marker.
pub const WHALE_THRESHOLD: f64 = 10_000.0;

/// Width of the sparkline in a quote line.
pub const QUOTE_SPARK_WIDTH: usize = 20;

const SYMBOL_WIDTH: usize = 8;
const VALUE_WIDTH: usize = 14;
const USER_WIDTH: usize = 18;

pub fn is_whale(value: f64) -> bool {
    value >= WHALE_THRESHOLD
}

/// `🐋 ▲ BUY   BTC        $12,000.00  trader42            13:45:10`
///
/// Trades without a timestamp are stamped with the current time.
pub fn trade_line(trade: &TradeEvent, theme: &Theme) -> String {
    let prefix = if is_whale(trade.value) {
        theme.paint(Intent::Warning, "🐋 ")
    } else {
        "   ".to_string()
    };
    let arrow = match trade.side {
        Side::Buy => theme.paint(Intent::StrongPositive, "▲ BUY "),
        Side::Sell => theme.paint(Intent::StrongNegative, "▼ SELL"),
    };
    let symbol = if trade.symbol.is_empty() { "????" } else { &trade.symbol };
    let symbol = theme.paint(Intent::Symbol, pad(symbol, SYMBOL_WIDTH, Align::Left));
    let value = pad(&fmt_price(Some(trade.value), theme), VALUE_WIDTH, Align::Right);
    let user = trade.user_id.as_deref().filter(|u| !u.is_empty()).unwrap_or("anon");
    let user = theme.paint(Intent::Muted, pad(&truncate(user, USER_WIDTH), USER_WIDTH, Align::Left));
    let time = fmt_time(trade.timestamp.unwrap_or_else(|| Utc::now().timestamp_millis()), theme);

    format!("{prefix}{arrow}  {symbol}  {value}  {user}  {time}")
}

/// `  ── 20 trades  vol: $123,456 ──`
pub fn summary_line(tally: &Tally, theme: &Theme) -> String {
    theme.paint(
        Intent::Muted,
        format!(
            "  ── {} trades  vol: ${} ──",
            tally.count,
            group_thousands(tally.volume, 0)
        ),
    )
}

/// Printed once when the stream stops.
pub fn closing_line(tally: &Tally, theme: &Theme) -> String {
    theme.paint(
        Intent::Muted,
        format!(
            "  Closing... {} trades, ${} volume",
            tally.count,
            group_thousands(tally.volume, 0)
        ),
    )
}

/// One symbol's row in the price watch.
///
/// The price flashes green or red when it moved since the previous tick.
/// The sparkline appears once there are more than two points of history.
pub fn quote_line(symbol: &str, quote: &Quote, history: &SeriesHistory, theme: &Theme) -> String {
    let name = theme.paint(Intent::Symbol, pad(symbol, SYMBOL_WIDTH, Align::Left));

    let price = if quote.current_price.is_finite() {
        let flash = match history.last_move(symbol) {
            Some(Ordering::Greater) => Intent::StrongPositive,
            Some(Ordering::Less) => Intent::StrongNegative,
            _ => Intent::Neutral,
        };
        theme.paint(flash, price_text(quote.current_price))
    } else {
        fmt_price(None, theme)
    };

    let spark = if history.len(symbol) > 2 {
        sparkline(&history.values(symbol), QUOTE_SPARK_WIDTH, theme)
    } else {
        theme.paint(Intent::Muted, "─".repeat(QUOTE_SPARK_WIDTH))
    };

    format!(
        "  {name}  {}  {}  {spark}  {} {}",
        pad(&price, 18, Align::Left),
        pad(&fmt_change(quote.change_24h, theme), 12, Align::Left),
        theme.paint(Intent::Muted, "mcap:"),
        fmt_mcap(quote.market_cap, theme),
    )
}

/// Row shown for a symbol the source has no quote for.
pub fn missing_quote_line(symbol: &str, theme: &Theme) -> String {
    format!(
        "  {}  {}",
        theme.paint(Intent::Symbol, pad(symbol, SYMBOL_WIDTH, Align::Left)),
        theme.paint(Intent::Negative, "error fetching data")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::text::{strip_ansi, visible_width};

    fn trade(side: Side, value: f64) -> TradeEvent {
        TradeEvent {
            symbol: "BTC".to_string(),
            side,
            value,
            user_id: Some("trader42".to_string()),
            // 2024-01-05 13:45:10 UTC
            timestamp: Some(1_704_462_310_000),
        }
    }

    #[test]
    fn test_trade_line_layout() {
        let line = trade_line(&trade(Side::Buy, 250.0), &Theme::plain());
        assert_eq!(
            line,
            "   ▲ BUY   BTC            $250.0000  trader42            13:45:10"
        );
    }

    #[test]
    fn test_whale_marker_keeps_alignment() {
        let theme = Theme::dark();
        let small = trade_line(&trade(Side::Sell, 9_999.0), &theme);
        let whale = trade_line(&trade(Side::Sell, 10_000.0), &theme);
        assert!(!small.contains('🐋'));
        assert!(whale.contains('🐋'));
        assert!(strip_ansi(&whale).contains("▼ SELL"));
        assert_eq!(visible_width(&small), visible_width(&whale));
    }

    #[test]
    fn test_anonymous_and_long_user() {
        let mut t = trade(Side::Buy, 1.0);
        t.user_id = None;
        assert!(trade_line(&t, &Theme::plain()).contains("anon"));

        t.user_id = Some("x".repeat(40));
        let line = trade_line(&t, &Theme::plain());
        assert!(line.contains(&"x".repeat(18)));
        assert!(!line.contains(&"x".repeat(19)));
    }

    #[test]
    fn test_summary_line() {
        let tally = Tally {
            count: 20,
            volume: 123_456.7,
        };
        assert_eq!(
            summary_line(&tally, &Theme::plain()),
            "  ── 20 trades  vol: $123,457 ──"
        );
    }

    #[test]
    fn test_closing_line() {
        let tally = Tally {
            count: 3,
            volume: 1_500.0,
        };
        assert_eq!(
            closing_line(&tally, &Theme::plain()),
            "  Closing... 3 trades, $1,500 volume"
        );
    }

    #[test]
    fn test_quote_line_sparkline_after_three_points() {
        let theme = Theme::plain();
        let quote = Quote {
            current_price: 101.0,
            change_24h: Some(1.5),
            market_cap: Some(2_000_000.0),
        };
        let mut history = SeriesHistory::default();
        history.record("BTC", 100.0);
        history.record("BTC", 101.0);
        let line = quote_line("BTC", &quote, &history, &theme);
        assert!(line.contains(&"─".repeat(QUOTE_SPARK_WIDTH)));
        assert!(line.contains("$101.0000"));
        assert!(line.contains("+1.50%"));
        assert!(line.ends_with("mcap: $2.00M"));

        history.record("BTC", 102.0);
        let line = quote_line("BTC", &quote, &history, &theme);
        assert!(line.contains("▁▅█"));
    }

    #[test]
    fn test_quote_price_flashes_on_move() {
        let theme = Theme::dark();
        let quote = Quote {
            current_price: 99.0,
            change_24h: None,
            market_cap: None,
        };
        let mut history = SeriesHistory::default();
        history.record("ETH", 100.0);
        history.record("ETH", 99.0);
        let line = quote_line("ETH", &quote, &history, &theme);
        assert!(line.contains(&theme.paint(Intent::StrongNegative, "$99.0000")));
    }

    #[test]
    fn test_missing_quote_line() {
        assert_eq!(
            missing_quote_line("DOGE", &Theme::plain()),
            "  DOGE      error fetching data"
        );
    }
}
