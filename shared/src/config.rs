use anyhow::Context;
use chartcache::config::ChartConfig;
use dotenv::dotenv;
use std::str::FromStr;

pub struct Config {
    pub redis_url: String,
    pub poloniex_api_url: String,
    pub api_bind_addr: String,
    pub chart_frame: Option<i64>,
    pub chart_period: Option<i64>,
    pub chart_window: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        Ok(Config {
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            poloniex_api_url: lookup("POLONIEX_API_URL")
                .unwrap_or_else(|| "https://poloniex.com/public".to_string()),
            api_bind_addr: lookup("API_BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0:9999".to_string()),
            chart_frame: parse_override(&lookup, "CHART_FRAME")?,
            chart_period: parse_override(&lookup, "CHART_PERIOD")?,
            chart_window: parse_override(&lookup, "CHART_WINDOW")?,
        })
    }

    /// Chart defaults with any environment overrides applied
    pub fn chart_config(&self) -> ChartConfig {
        let mut config = ChartConfig::default();
        if let Some(frame) = self.chart_frame {
            config = config.frame(frame);
        }
        if let Some(period) = self.chart_period {
            config = config.period(period);
        }
        if let Some(window) = self.chart_window {
            config = config.window(window);
        }
        config
    }
}

fn parse_override<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| raw.trim().parse::<T>().with_context(|| format!("{} is not a valid number: {:?}", name, raw)))
        .transpose()
}
