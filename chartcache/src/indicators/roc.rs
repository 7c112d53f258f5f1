//! ROC (Rate of Change) indicator

use crate::indicators::{ta_error, Indicator};
use crate::Result;
use ta::indicators::RateOfChange as TaRateOfChange;
use ta::Next;

/// Rate of change over a fixed lag, in percent
#[derive(Debug)]
pub struct RateOfChange {
    inner: TaRateOfChange,
    lag: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl RateOfChange {
    pub fn new(lag: usize) -> Result<Self> {
        Ok(Self {
            inner: TaRateOfChange::new(lag).map_err(|e| ta_error("ROC", e))?,
            lag,
            update_count: 0,
            last_value: None,
        })
    }
}

impl Indicator for RateOfChange {
    fn update(&mut self, value: f64) {
        let roc_value = self.inner.next(value);
        self.update_count += 1;
        // the first `lag` inputs have nothing to compare against
        if self.update_count > self.lag {
            self.last_value = Some(roc_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count > self.lag
    }
}

/// Calculate ROC from a series of values
pub fn calculate_roc(values: &[f64], lag: usize) -> Result<Vec<Option<f64>>> {
    let mut roc = RateOfChange::new(lag)?;
    Ok(super::run(&mut roc, values))
}
