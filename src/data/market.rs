//! Normalized market data handed to the renderers.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One time bucket of price movement.
///
/// Missing fields deserialize to 0. A `null` or non-numeric price becomes
/// NaN, which the chart skips instead of plotting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candle {
    /// Bucket start, unix seconds.
    pub open_time: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub open: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub high: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub low: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub close: f64,
}

impl Candle {
    pub fn new(open_time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
        }
    }

    /// Closed at or above the open. A flat candle counts as bullish.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    pub fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close].iter().all(|v| v.is_finite())
    }
}

/// Latest state of one watched symbol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quote {
    #[serde(deserialize_with = "lenient_f64")]
    pub current_price: f64,
    #[serde(rename = "change24h", deserialize_with = "lenient_opt_f64")]
    pub change_24h: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub market_cap: Option<f64>,
}

/// Quotes keyed by symbol, in symbol order.
pub type QuoteSnapshot = BTreeMap<String, Quote>;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Side {
    Buy,
    #[default]
    Sell,
}

impl From<String> for Side {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("buy") {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

impl From<Side> for String {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => "BUY".to_string(),
            Side::Sell => "SELL".to_string(),
        }
    }
}

/// A single executed trade from the live feed.
///
/// Feeds send the dollar amount as either `value` or `amount`; `value` wins
/// when both are present, and a trade with neither is worth 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TradeRecord")]
pub struct TradeEvent {
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: Side,
    /// Trade value in dollars.
    pub value: f64,
    pub user_id: Option<String>,
    /// Execution time, unix milliseconds.
    pub timestamp: Option<i64>,
}

/// Wire shape of a trade before the value fields are merged.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TradeRecord {
    symbol: String,
    #[serde(rename = "type")]
    side: Side,
    #[serde(deserialize_with = "lenient_opt_f64")]
    value: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    amount: Option<f64>,
    user_id: Option<String>,
    timestamp: Option<i64>,
}

impl From<TradeRecord> for TradeEvent {
    fn from(record: TradeRecord) -> Self {
        Self {
            symbol: record.symbol,
            side: record.side,
            value: record.value.or(record.amount).unwrap_or(0.0),
            user_id: record.user_id,
            timestamp: record.timestamp,
        }
    }
}

/// Accept a number, a numeric string, or `null` (as NaN).
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?).unwrap_or(f64::NAN))
}

/// Like [`lenient_f64`], but `null` and garbage become `None`.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?))
}

/// Read a JSON value as a number if it plausibly is one.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
