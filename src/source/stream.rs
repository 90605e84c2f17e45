//! Stream-based trade source.
//!
//! Reads newline-delimited JSON trades from an async byte stream (stdin, a
//! TCP connection, a pipe from a websocket client) and forwards them over a
//! channel to the stream printer.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::set_error;
use crate::data::market::number_from_value;
use crate::data::TradeEvent;

const CHANNEL_CAPACITY: usize = 256;

/// Shapes a feed line may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum Batch {
    Wrapped { trades: Vec<TradeEvent> },
    Many(Vec<TradeEvent>),
    One(Map<String, Value>),
}

/// Parse one feed line: a trade object, an array of trades, or
/// `{"trades": [...]}`.
///
/// A lone object only counts as a trade when it names a symbol, carries a
/// finite `value` or `amount`, and its `type` (if any) is a side or
/// `trade`. Anything else (acks, pings, error frames) yields no trades.
pub fn parse_trades(line: &str) -> Result<Vec<TradeEvent>> {
    Ok(match serde_json::from_str::<Batch>(line)? {
        Batch::Wrapped { trades } | Batch::Many(trades) => trades,
        Batch::One(object) if is_trade(&object) => {
            vec![serde_json::from_value(Value::Object(object))?]
        }
        Batch::One(object) => {
            debug!(kind = ?object.get("type"), "ignoring non-trade message");
            Vec::new()
        }
    })
}

fn is_trade(object: &Map<String, Value>) -> bool {
    let kind_ok = match object.get("type") {
        None => true,
        Some(Value::String(kind)) => ["buy", "sell", "trade"]
            .iter()
            .any(|k| kind.eq_ignore_ascii_case(k)),
        Some(_) => false,
    };
    let has_symbol = object
        .get("symbol")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty());
    let has_value = ["value", "amount"].iter().any(|key| {
        object
            .get(*key)
            .and_then(number_from_value)
            .is_some_and(f64::is_finite)
    });
    kind_ok && has_symbol && has_value
}

/// Trades read by a background task, in arrival order.
///
/// Malformed lines are skipped and recorded as the last error; they never
/// stop the stream.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use candlewick::source::TradeStream;
///
/// # tokio_test::block_on(async {
/// let feed = Cursor::new(b"{\"symbol\":\"BTC\",\"type\":\"BUY\",\"value\":250}\n".to_vec());
/// let mut trades = TradeStream::spawn(feed, "example").into_receiver();
/// let trade = trades.recv().await.unwrap();
/// assert_eq!(trade.symbol, "BTC");
/// # });
/// ```
#[derive(Debug)]
pub struct TradeStream {
    receiver: mpsc::Receiver<TradeEvent>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl TradeStream {
    /// Spawn a task reading trades from `reader` until EOF or until the
    /// receiver is dropped.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => {
                        if !forward(&line, &tx, &error_handle).await {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("trade feed reached end of input");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "trade feed read failed");
                        set_error(&error_handle, Some(format!("Read error: {e}")));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {description}"),
            last_error,
        }
    }

    /// Trades from raw JSON payloads pushed by another task, one payload per
    /// message.
    pub fn from_bytes_channel(mut rx: mpsc::Receiver<Vec<u8>>, description: &str) -> Self {
        let (tx, trade_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                let line = String::from_utf8_lossy(&bytes);
                if !forward(&line, &tx, &error_handle).await {
                    break;
                }
            }
        });

        Self {
            receiver: trade_rx,
            description: format!("stream: {description}"),
            last_error,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The last parse or read error, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Next trade without waiting.
    pub fn try_next(&mut self) -> Option<TradeEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn into_receiver(self) -> mpsc::Receiver<TradeEvent> {
        self.receiver
    }
}

/// Parse `line` and send its trades. Returns false once the receiver is gone.
async fn forward(
    line: &str,
    tx: &mpsc::Sender<TradeEvent>,
    error: &Mutex<Option<String>>,
) -> bool {
    match parse_trades(line.trim()) {
        Ok(trades) => {
            set_error(error, None);
            for trade in trades {
                if tx.send(trade).await.is_err() {
                    return false;
                }
            }
        }
        Err(e) => {
            debug!(error = %e, "skipping malformed trade line");
            set_error(error, Some(format!("Parse error: {e}")));
        }
    }
    true
}
