//! Chartcache: a read-through candle chart cache with indicator tables
//!
//! This crate keeps one chart document per trading pair in a document store,
//! refetching it from the exchange once it is older than the freshness window,
//! and turns the cached candles into a time-indexed polars table of indicators
//! using [ta-rs](https://github.com/greyblake/ta-rs).
//!
//! # Features
//!
//! - **Chart Cache**: refresh-if-stale policy with a fixed 60 second window
//! - **Indicator Tables**: Bollinger Bands, EMA, MACD, RSI, ROC and candle shape columns
//! - **Exchange Integration**: Poloniex `returnChartData` provider
//! - **Storage**: Redis and in-memory chart stores
//!
//! # Example
//!
//! ```no_run
//! use chartcache::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = redis::Client::open("redis://localhost:6379")?;
//!     let store = RedisChartStore::connect(client).await?;
//!     let provider = PoloniexClient::new("https://poloniex.com/public");
//!     let chart = ChartCache::new(store, provider, "BTC_LTC", ChartConfig::default())?;
//!     let table = chart.with_indicators().await?;
//!     println!("{}", table.select(&["sma", "emafast", "rsi"])?.tail(20));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod exchange;
pub mod indicators;
pub mod store;

// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::*;
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::exchange::*;
    pub use crate::indicators::*;
    pub use crate::store::*;

    pub use anyhow::Context;
}

/// Result type used by the collaborator traits
pub type Result<T> = anyhow::Result<T>;
