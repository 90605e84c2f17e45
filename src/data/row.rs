//! Table rows: raw values keyed by column.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::market::number_from_value;

static NULL: Value = Value::Null;

/// One table record.
///
/// Holds the raw values a caller fetched plus any derived fields it
/// computed up front (rank, share of total, ...). Column formatters read
/// from it by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value for `key`; missing keys read as `null`.
    pub fn get(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }

    /// Numeric value for `key`, accepting numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        number_from_value(self.get(key))
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_builder_and_lookup() {
        let row = Row::new().with("symbol", "BTC").with("price", 50_000.0).with("rank", 1);
        assert_eq!(row.text("symbol"), Some("BTC"));
        assert_eq!(row.number("price"), Some(50_000.0));
        assert_eq!(row.number("rank"), Some(1.0));
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_missing_key_is_null() {
        let row = Row::new();
        assert!(row.get("nope").is_null());
        assert_eq!(row.number("nope"), None);
        assert!(row.is_empty());
    }

    #[test]
    fn test_rows_from_json_array() {
        let rows: Vec<Row> =
            serde_json::from_value(json!([{"symbol": "ETH", "price": "3000.5"}])).unwrap();
        assert_eq!(rows[0].number("price"), Some(3000.5));
    }
}
