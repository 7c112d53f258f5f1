//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::{ta_error, Indicator};
use crate::Result;
use ta::indicators::{MovingAverageConvergenceDivergence, MovingAverageConvergenceDivergenceOutput};
use ta::Next;

pub const MACD_FAST_PERIOD: usize = 12;
pub const MACD_SLOW_PERIOD: usize = 26;
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// MACD indicator wrapper
///
/// The MACD line is reported once the slow EMA has seen `slow_period`
/// values; the signal line and histogram need `signal_period - 1` more.
#[derive(Debug)]
pub struct MACD {
    inner: MovingAverageConvergenceDivergence,
    slow_period: usize,
    signal_period: usize,
    update_count: usize,
    last_output: Option<MovingAverageConvergenceDivergenceOutput>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self> {
        Ok(Self {
            inner: MovingAverageConvergenceDivergence::new(fast_period, slow_period, signal_period)
                .map_err(|e| ta_error("MACD", e))?,
            slow_period,
            signal_period,
            update_count: 0,
            last_output: None,
        })
    }

    /// Get MACD line value
    pub fn macd(&self) -> Option<f64> {
        if self.update_count >= self.slow_period {
            self.last_output.as_ref().map(|o| o.macd)
        } else {
            None
        }
    }

    /// Get signal line value
    pub fn signal(&self) -> Option<f64> {
        if self.is_ready() {
            self.last_output.as_ref().map(|o| o.signal)
        } else {
            None
        }
    }

    /// Get histogram value (MACD - Signal)
    pub fn histogram(&self) -> Option<f64> {
        if self.is_ready() {
            self.last_output.as_ref().map(|o| o.histogram)
        } else {
            None
        }
    }
}

impl Indicator for MACD {
    fn update(&mut self, value: f64) {
        self.last_output = Some(self.inner.next(value));
        self.update_count += 1;
    }

    fn value(&self) -> Option<f64> {
        self.macd()
    }

    fn is_ready(&self) -> bool {
        self.update_count + 1 >= self.slow_period + self.signal_period
    }
}

/// MACD line, signal line and histogram, one entry per input value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MACDColumns {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Calculate MACD with the standard 12/26/9 periods
pub fn calculate_macd(values: &[f64]) -> Result<MACDColumns> {
    let mut macd = MACD::new(MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD)?;
    let mut columns = MACDColumns::default();

    for &value in values {
        macd.update(value);
        columns.macd.push(macd.macd());
        columns.signal.push(macd.signal());
        columns.histogram.push(macd.histogram());
    }

    Ok(columns)
}
