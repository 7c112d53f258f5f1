//! Chart configuration

use crate::error::{ChartError, ChartResult};
use crate::exchange::{DAY, MINUTE};
use serde::{Deserialize, Serialize};

/// What to request from the exchange on refresh, and the indicator lookback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// How far back to request candles, seconds
    pub frame: i64,
    /// Candle bucket width, seconds
    pub period: i64,
    /// Lookback for Bollinger Bands and the slow EMA; the fast EMA uses half of it
    pub window: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            frame: DAY * 7,
            period: MINUTE * 5,
            window: 120,
        }
    }
}

impl ChartConfig {
    pub fn frame(mut self, frame: i64) -> Self {
        self.frame = frame;
        self
    }

    pub fn period(mut self, period: i64) -> Self {
        self.period = period;
        self
    }

    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Reject values the cache or the indicator step cannot work with
    pub fn validate(&self) -> ChartResult<()> {
        if self.frame <= 0 {
            return Err(ChartError::Config(format!("frame must be positive, got {}", self.frame)));
        }
        if self.period <= 0 {
            return Err(ChartError::Config(format!("period must be positive, got {}", self.period)));
        }
        // window / 2 feeds the fast EMA, which needs a lookback of at least 1
        if self.window < 2 {
            return Err(ChartError::Config(format!("window must be at least 2, got {}", self.window)));
        }
        Ok(())
    }
}
