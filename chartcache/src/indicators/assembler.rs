//! Appends indicator columns to the raw candle table

use crate::data::{Candle, CandleTable};
use crate::error::{ChartError, ChartResult};
use crate::indicators::{IndicatorLibrary, TaIndicators};

/// Lag for the `roc` column
pub const ROC_LAG: usize = 1;
/// Lookback for the `rsi` column
pub const RSI_LOOKBACK: usize = 5;

/// Builds the indicator table for a chart record
///
/// Every indicator is computed over the `weightedAverage` column. Columns
/// are padded with missing values at the start of the series, where the
/// history is too short for the lookback.
#[derive(Debug, Clone, Default)]
pub struct IndicatorAssembler<L = TaIndicators> {
    library: L,
}

impl IndicatorAssembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: IndicatorLibrary> IndicatorAssembler<L> {
    /// Use a different indicator implementation
    pub fn with_library(library: L) -> Self {
        Self { library }
    }

    /// Table for a candle sequence with the given lookback window
    pub fn assemble(&self, candles: &[Candle], window: usize) -> ChartResult<CandleTable> {
        if window < 2 {
            return Err(ChartError::Config(format!("window must be at least 2, got {}", window)));
        }
        let mut table = CandleTable::from_candles(candles)?;
        let rows = table.len();
        let prices = weighted_averages(candles)?;

        let bands = self.library.bollinger_bands(&prices, window).map_err(indicator_error)?;
        table.insert_column("sma", bands.iter().map(|b| b.as_ref().map(|b| b.middle)).collect())?;
        table.insert_column("upperband", bands.iter().map(|b| b.as_ref().map(|b| b.upper)).collect())?;
        table.insert_column("lowerband", bands.iter().map(|b| b.as_ref().map(|b| b.lower)).collect())?;
        table.insert_column("bbpercent", bands.iter().map(|b| b.as_ref().and_then(|b| b.percent)).collect())?;
        table.insert_column("bbrange", bands.iter().map(|b| b.as_ref().map(|b| b.range)).collect())?;

        table.insert_column("emaslow", self.library.ema(&prices, window).map_err(indicator_error)?)?;
        table.insert_column("emafast", self.library.ema(&prices, window / 2).map_err(indicator_error)?)?;

        let macd = self.library.macd(&prices).map_err(indicator_error)?;
        table.insert_column("macd", macd.macd)?;
        table.insert_column("macdsignal", macd.signal)?;
        table.insert_column("macdhist", macd.histogram)?;

        let roc = self.library.rate_of_change(&prices, ROC_LAG).map_err(indicator_error)?;
        table.insert_column("roc", pad_front(roc, rows))?;
        let rsi = self.library.rsi(&prices, RSI_LOOKBACK).map_err(indicator_error)?;
        table.insert_column("rsi", pad_front(rsi, rows))?;

        table.insert_column("bodysize", candles.iter().map(|c| Some(c.body_size())).collect())?;
        table.insert_column("shadowsize", candles.iter().map(|c| Some(c.shadow_size())).collect())?;

        Ok(table)
    }
}

fn weighted_averages(candles: &[Candle]) -> ChartResult<Vec<f64>> {
    candles
        .iter()
        .enumerate()
        .map(|(index, c)| {
            c.weighted_average.ok_or(ChartError::DataShape {
                field: "weightedAverage",
                index,
            })
        })
        .collect()
}

/// Left-pad a compact indicator output with missing values up to `rows`
fn pad_front(values: Vec<f64>, rows: usize) -> Vec<Option<f64>> {
    let missing = rows.saturating_sub(values.len());
    std::iter::repeat(None)
        .take(missing)
        .chain(values.into_iter().map(Some))
        .take(rows)
        .collect()
}

fn indicator_error(err: anyhow::Error) -> ChartError {
    ChartError::Indicator(format!("{:#}", err))
}
