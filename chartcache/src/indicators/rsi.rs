//! RSI (Relative Strength Index) indicator

use crate::indicators::{ta_error, Indicator};
use crate::Result;
use ta::indicators::RelativeStrengthIndex;
use ta::Next;

/// RSI indicator wrapper
#[derive(Debug)]
pub struct RSI {
    inner: RelativeStrengthIndex,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Result<Self> {
        Ok(Self {
            inner: RelativeStrengthIndex::new(period).map_err(|e| ta_error("RSI", e))?,
            period,
            update_count: 0,
            last_value: None,
        })
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for RSI {
    fn update(&mut self, value: f64) {
        let rsi_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count > self.period {
            self.last_value = Some(rsi_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        // ta RSI needs period+1 values
        self.update_count > self.period
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut rsi = RSI::new(period)?;
    Ok(super::run(&mut rsi, values))
}
