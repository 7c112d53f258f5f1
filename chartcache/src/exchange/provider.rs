//! Market-data provider contract

use crate::data::Candle;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One minute in seconds
pub const MINUTE: i64 = 60;
/// One hour in seconds
pub const HOUR: i64 = MINUTE * 60;
/// One day in seconds
pub const DAY: i64 = HOUR * 24;

/// Source of candle data for a trading pair
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Candles of `period` seconds for `pair`, from `start` (Unix seconds) up to now,
    /// oldest first
    async fn fetch_candles(&self, pair: &str, period: i64, start: i64) -> Result<Vec<Candle>>;
}

#[async_trait]
impl<T: MarketDataProvider + ?Sized> MarketDataProvider for Arc<T> {
    async fn fetch_candles(&self, pair: &str, period: i64, start: i64) -> Result<Vec<Candle>> {
        (**self).fetch_candles(pair, period, start).await
    }
}
