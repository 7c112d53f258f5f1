use anyhow::Result;
use chartcache::prelude::*;
use shared::{get_redis_client, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Prints the newest and oldest rows of a pair's indicator table

const DEFAULT_PAIR: &str = "BTC_LTC";
const ROWS: usize = 20;
const COLUMNS: [&str; 5] = ["sma", "emafast", "rsi", "macd", "bbpercent"];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let pair = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_PAIR.to_string());
    let config = Config::from_env()?;

    let store = RedisChartStore::connect(get_redis_client(&config.redis_url)?).await?;
    let provider = PoloniexClient::new(config.poloniex_api_url.clone());
    let chart = ChartCache::new(store, provider, pair.as_str(), config.chart_config())?;

    info!("Loading {} chart with indicators", pair);
    let table = chart.with_indicators().await?;
    let selected = table.select(&COLUMNS)?;

    // polars truncates frames to a handful of rows by default
    std::env::set_var("POLARS_FMT_MAX_ROWS", ROWS.to_string());
    std::env::set_var("POLARS_FMT_MAX_COLS", (COLUMNS.len() + 1).to_string());

    println!("{}", selected.tail(ROWS));
    println!("{}", selected.head(ROWS));

    Ok(())
}
