//! Technical indicators module
//!
//! Stateful indicator wrappers over the `ta` crate, the [`IndicatorLibrary`]
//! capability they are exposed through, and the assembler that appends their
//! output to a [`CandleTable`](crate::data::CandleTable).

pub mod assembler;
pub mod bb;
pub mod ema;
pub mod library;
pub mod macd;
pub mod roc;
pub mod rsi;

pub use assembler::*;
pub use bb::*;
pub use ema::*;
pub use library::*;
pub use macd::*;
pub use roc::*;
pub use rsi::*;

/// Indicator trait for all indicators
pub trait Indicator {
    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}

/// Feed every value through the indicator, recording its value after each step
pub(crate) fn run<I: Indicator>(indicator: &mut I, values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&value| {
            indicator.update(value);
            indicator.value()
        })
        .collect()
}

pub(crate) fn ta_error(indicator: &str, err: ta::errors::TaError) -> anyhow::Error {
    anyhow::anyhow!("{} rejected its parameters: {:?}", indicator, err)
}
