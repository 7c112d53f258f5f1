//! Bollinger Bands indicator

use crate::indicators::{ta_error, Indicator};
use crate::Result;
use ta::indicators::{BollingerBands as TaBollingerBands, BollingerBandsOutput};
use ta::Next;

/// Bollinger Bands indicator wrapper
#[derive(Debug)]
pub struct BollingerBands {
    inner: TaBollingerBands,
    period: usize,
    update_count: usize,
    last_price: f64,
    last_output: Option<BollingerBandsOutput>,
}

impl BollingerBands {
    /// Create new Bollinger Bands indicator
    pub fn new(period: usize, std_dev: f64) -> Result<Self> {
        Ok(Self {
            inner: TaBollingerBands::new(period, std_dev).map_err(|e| ta_error("BollingerBands", e))?,
            period,
            update_count: 0,
            last_price: 0.0,
            last_output: None,
        })
    }

    /// Get middle band (SMA)
    pub fn middle(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.average)
    }

    /// Current bands together with the derived width and %b
    pub fn result(&self) -> Option<BBResult> {
        let output = self.last_output.as_ref()?;
        let range = output.upper - output.lower;
        let percent = if range > 0.0 {
            Some((self.last_price - output.lower) / range)
        } else {
            None
        };
        Some(BBResult {
            upper: output.upper,
            middle: output.average,
            lower: output.lower,
            range,
            percent,
        })
    }
}

impl Indicator for BollingerBands {
    fn update(&mut self, value: f64) {
        let output = self.inner.next(value);
        self.last_price = value;
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_output = Some(output);
        }
    }

    fn value(&self) -> Option<f64> {
        self.middle()
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Bollinger Bands result structure
#[derive(Debug, Clone, PartialEq)]
pub struct BBResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// upper - lower
    pub range: f64,
    /// Position of the price inside the band; undefined for a zero-width band
    pub percent: Option<f64>,
}

/// Calculate Bollinger Bands from a series of values
pub fn calculate_bb(values: &[f64], period: usize, std_dev: f64) -> Result<Vec<Option<BBResult>>> {
    let mut bb = BollingerBands::new(period, std_dev)?;
    Ok(values
        .iter()
        .map(|&value| {
            bb.update(value);
            bb.result()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_has_no_percent() {
        let bands = calculate_bb(&[5.0; 6], 3, 2.0).unwrap();

        assert!(bands[1].is_none());
        let last = bands[5].as_ref().unwrap();
        assert_eq!(last.middle, 5.0);
        assert_eq!(last.range, 0.0);
        assert!(last.percent.is_none());
    }

    #[test]
    fn test_percent_inside_band() {
        let bands = calculate_bb(&[1.0, 3.0, 2.0, 4.0, 3.0], 3, 2.0).unwrap();
        let last = bands[4].as_ref().unwrap();

        assert!(last.lower < last.middle && last.middle < last.upper);
        let percent = last.percent.unwrap();
        assert!((0.0..=1.0).contains(&percent));
    }
}
