//! Error types for chart retrieval and indicator assembly

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias for the cache and assembler operations
pub type ChartResult<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The exchange fetch failed and there was no cached record to fall back to
    #[error("market data fetch failed for {pair}: {source}")]
    Provider {
        pair: String,
        #[source]
        source: anyhow::Error,
    },

    /// Reading or writing the chart store failed
    #[error("chart store error: {0}")]
    Store(#[source] anyhow::Error),

    /// A candle lacks a field the indicator step needs
    #[error("candle {index} is missing required field `{field}`")]
    DataShape { field: &'static str, index: usize },

    /// The indicator library rejected its parameters
    #[error("indicator error: {0}")]
    Indicator(String),

    #[error("invalid chart config: {0}")]
    Config(String),

    #[error("table error: {0}")]
    Table(#[from] PolarsError),
}
