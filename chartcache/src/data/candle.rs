//! OHLC candle data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One candle as returned by the exchange's chart endpoint
///
/// Field names follow the exchange payload (`quoteVolume`, `weightedAverage`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Bucket start, Unix seconds
    pub date: i64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Opening price
    pub open: f64,
    /// Closing price
    pub close: f64,
    /// Volume in the quote currency
    #[serde(default)]
    pub volume: f64,
    /// Volume in the base currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_volume: Option<f64>,
    /// Volume weighted average price over the bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_average: Option<f64>,
}

impl Candle {
    /// Create a new candle with a weighted average price
    pub fn new(
        date: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        weighted_average: f64,
    ) -> Self {
        Self {
            date,
            high,
            low,
            open,
            close,
            volume,
            quote_volume: None,
            weighted_average: Some(weighted_average),
        }
    }

    /// Bucket start as a calendar timestamp
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Signed body size, positive when the candle closed below its open
    pub fn body_size(&self) -> f64 {
        self.open - self.close
    }

    /// Total range (high - low)
    pub fn shadow_size(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_shape() {
        let candle = Candle::new(1_500_000_000, 105.0, 110.0, 95.0, 100.0, 1000.0, 102.5);

        assert_eq!(candle.body_size(), 5.0);
        assert_eq!(candle.shadow_size(), 15.0);
        assert_eq!(candle.datetime().unwrap().timestamp(), 1_500_000_000);
    }

    #[test]
    fn test_candle_from_exchange_payload() {
        let json = r#"{"date":1405699200,"high":0.0045388,"low":0.00403001,"open":0.00404545,
            "close":0.00427592,"volume":44.11655644,"quoteVolume":10259.29079097,
            "weightedAverage":0.00430015}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();

        assert_eq!(candle.date, 1405699200);
        assert_eq!(candle.quote_volume, Some(10259.29079097));
        assert_eq!(candle.weighted_average, Some(0.00430015));
    }

    #[test]
    fn test_candle_without_weighted_average_still_decodes() {
        let json = r#"{"date":1,"high":2.0,"low":1.0,"open":1.5,"close":1.6,"volume":3.0}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();

        assert!(candle.weighted_average.is_none());
    }
}
