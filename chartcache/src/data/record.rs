//! Persisted per-pair chart document

use crate::config::ChartConfig;
use crate::data::Candle;
use serde::{Deserialize, Serialize};

/// Cached chart for one trading pair
///
/// A refresh replaces the whole record. A stored document without a
/// `timestamp` decodes to `0`, which forces the next lookup to refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// Time span requested on refresh, seconds
    pub frame: i64,
    /// Candle bucket width, seconds
    pub period: i64,
    /// Lookback length for moving-window indicators
    pub window: usize,
    /// Candles in provider order (oldest first)
    #[serde(default)]
    pub candles: Vec<Candle>,
    /// Unix time at which the last refresh finished
    #[serde(default)]
    pub timestamp: i64,
}

impl ChartRecord {
    /// Build a record from the config that requested it
    pub fn new(config: &ChartConfig, candles: Vec<Candle>, timestamp: i64) -> Self {
        Self {
            frame: config.frame,
            period: config.period,
            window: config.window,
            candles,
            timestamp,
        }
    }

    /// Seconds elapsed since the last refresh
    pub fn age(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }
}
