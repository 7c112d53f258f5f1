//! Poloniex public API client

use crate::data::Candle;
use crate::exchange::{MarketDataProvider, DAY, HOUR, MINUTE};
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Candle widths accepted by `returnChartData`
pub const SUPPORTED_PERIODS: [i64; 6] = [
    MINUTE * 5,
    MINUTE * 15,
    MINUTE * 30,
    HOUR * 2,
    HOUR * 4,
    DAY,
];

/// Upper bound for `end`; the exchange clamps it to now
const OPEN_END: i64 = 9_999_999_999;

/// `returnChartData` answers with either a candle list or an error object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChartDataResponse {
    Candles(Vec<Candle>),
    Error { error: String },
}

/// Poloniex public market-data client
#[derive(Debug, Clone)]
pub struct PoloniexClient {
    base_url: String,
    http: reqwest::Client,
}

impl PoloniexClient {
    /// Create new client against the public endpoint, e.g. `https://poloniex.com/public`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch chart data for `pair`
    pub async fn return_chart_data(&self, pair: &str, period: i64, start: i64) -> Result<Vec<Candle>> {
        if !SUPPORTED_PERIODS.contains(&period) {
            return Err(anyhow::anyhow!("Unsupported period: {}", period));
        }

        debug!("Requesting chart data: {} period={} start={}", pair, period, start);
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("command", "returnChartData".to_string()),
                ("currencyPair", pair.to_string()),
                ("period", period.to_string()),
                ("start", start.to_string()),
                ("end", OPEN_END.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("returnChartData request for {} failed", pair))?
            .error_for_status()?;

        let body = response.text().await?;
        parse_chart_data(&body)
    }
}

fn parse_chart_data(body: &str) -> Result<Vec<Candle>> {
    match serde_json::from_str::<ChartDataResponse>(body).context("malformed returnChartData body")? {
        ChartDataResponse::Candles(candles) => Ok(candles),
        ChartDataResponse::Error { error } => Err(anyhow::anyhow!("Poloniex error: {}", error)),
    }
}

#[async_trait]
impl MarketDataProvider for PoloniexClient {
    async fn fetch_candles(&self, pair: &str, period: i64, start: i64) -> Result<Vec<Candle>> {
        self.return_chart_data(pair, period, start).await
    }
}
