//! Indicator math behind a capability trait
//!
//! The assembler only needs these five operations; any numerically
//! equivalent implementation can stand in for [`TaIndicators`].

use crate::indicators::{calculate_bb, calculate_ema, calculate_macd, calculate_roc, calculate_rsi};
use crate::indicators::{BBResult, MACDColumns};
use crate::Result;

/// Band width used for the Bollinger columns
pub const BB_STD_DEV: f64 = 2.0;

pub trait IndicatorLibrary {
    /// Bands over `window` values, `None` during warm-up
    fn bollinger_bands(&self, series: &[f64], window: usize) -> Result<Vec<Option<BBResult>>>;

    /// EMA over `window` values, `None` during warm-up
    fn ema(&self, series: &[f64], window: usize) -> Result<Vec<Option<f64>>>;

    /// MACD with the library's default periods
    fn macd(&self, series: &[f64]) -> Result<MACDColumns>;

    /// Defined RSI values only: `series.len() - lookback` of them
    fn rsi(&self, series: &[f64], lookback: usize) -> Result<Vec<f64>>;

    /// Defined rate-of-change values only: `series.len() - lag` of them
    fn rate_of_change(&self, series: &[f64], lag: usize) -> Result<Vec<f64>>;
}

/// [`IndicatorLibrary`] backed by the `ta` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct TaIndicators;

impl IndicatorLibrary for TaIndicators {
    fn bollinger_bands(&self, series: &[f64], window: usize) -> Result<Vec<Option<BBResult>>> {
        calculate_bb(series, window, BB_STD_DEV)
    }

    fn ema(&self, series: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
        calculate_ema(series, window)
    }

    fn macd(&self, series: &[f64]) -> Result<MACDColumns> {
        calculate_macd(series)
    }

    fn rsi(&self, series: &[f64], lookback: usize) -> Result<Vec<f64>> {
        Ok(calculate_rsi(series, lookback)?.into_iter().flatten().collect())
    }

    fn rate_of_change(&self, series: &[f64], lag: usize) -> Result<Vec<f64>> {
        Ok(calculate_roc(series, lag)?.into_iter().flatten().collect())
    }
}
