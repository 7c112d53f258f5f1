use anyhow::Result;
use chartcache::exchange::PoloniexClient;
use chartcache::store::RedisChartStore;
use shared::{get_redis_client, Config};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;

use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting chart API server...");

    let config = Config::from_env()?;
    let chart_config = config.chart_config();
    chart_config.validate()?;

    let store = RedisChartStore::connect(get_redis_client(&config.redis_url)?).await?;
    info!("Connected to chart store");
    let provider = PoloniexClient::new(config.poloniex_api_url.clone());

    let state = AppState {
        store: Arc::new(store),
        provider: Arc::new(provider),
        config: chart_config,
    };
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.api_bind_addr).await?;
    info!("API server listening on http://{}", config.api_bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
