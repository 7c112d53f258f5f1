use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chartcache::cache::{refresh_if_stale, SystemClock};
use chartcache::config::ChartConfig;
use chartcache::data::{CandleTable, ChartRecord};
use chartcache::error::ChartError;
use chartcache::exchange::MarketDataProvider;
use chartcache::indicators::IndicatorAssembler;
use chartcache::store::ChartStore;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChartStore>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub config: ChartConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/charts/:pair", get(get_chart))
        .route("/api/charts/:pair/indicators", get(get_indicators))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    /// Only return the most recent rows
    pub tail: Option<usize>,
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_chart(
    State(state): State<AppState>,
    Path(pair): Path<String>,
) -> Result<Json<ChartRecord>, ApiError> {
    let record = current_chart(&state, &pair).await?;
    Ok(Json(record))
}

async fn get_indicators(
    State(state): State<AppState>,
    Path(pair): Path<String>,
    Query(query): Query<IndicatorQuery>,
) -> Result<Json<CandleTable>, ApiError> {
    let record = current_chart(&state, &pair).await?;
    let table = IndicatorAssembler::new().assemble(&record.candles, state.config.window)?;
    Ok(Json(match query.tail {
        Some(n) => table.tail(n),
        None => table,
    }))
}

async fn current_chart(state: &AppState, pair: &str) -> Result<ChartRecord, ChartError> {
    refresh_if_stale(&*state.store, &*state.provider, pair, &state.config, &SystemClock).await
}

/// Maps chart errors onto HTTP statuses
pub struct ApiError(ChartError);

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            ChartError::Provider { .. } => StatusCode::BAD_GATEWAY,
            ChartError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ChartError::DataShape { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ChartError::Indicator(_) | ChartError::Config(_) | ChartError::Table(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        error!("Chart request failed ({}): {:#}", status, anyhow::Error::from(self.0));
        (status, Json(json!({ "error": message }))).into_response()
    }
}
