//! Refresh-if-stale policy for per-pair chart records

use crate::cache::{Clock, SystemClock};
use crate::config::ChartConfig;
use crate::data::{CandleTable, ChartRecord};
use crate::error::{ChartError, ChartResult};
use crate::exchange::MarketDataProvider;
use crate::indicators::IndicatorAssembler;
use crate::store::ChartStore;
use tracing::{debug, info, warn};

/// Records older than this many seconds are refetched
pub const STALE_AFTER_SECS: i64 = 60;

/// Return the chart for `pair`, refreshing it first if it is stale
///
/// A missing record counts as infinitely old. When the exchange fetch fails
/// the stale record is returned instead; with no record at all the failure
/// is returned to the caller. Store errors always propagate.
pub async fn refresh_if_stale<S, P, C>(
    store: &S,
    provider: &P,
    pair: &str,
    config: &ChartConfig,
    clock: &C,
) -> ChartResult<ChartRecord>
where
    S: ChartStore + ?Sized,
    P: MarketDataProvider + ?Sized,
    C: Clock + ?Sized,
{
    let existing = store.find_one(pair).await.map_err(ChartError::Store)?;
    let now = clock.now();
    let age = existing.as_ref().map_or(now, |r| r.age(now));

    if age <= STALE_AFTER_SECS {
        if let Some(record) = existing {
            debug!("{} chart is fresh ({}s old)", pair, age);
            return Ok(record);
        }
    }

    info!("{} chart db updating...", pair);
    let candles = match provider.fetch_candles(pair, config.period, now - config.frame).await {
        Ok(candles) => candles,
        Err(source) => {
            return match existing {
                Some(stale) => {
                    warn!("{} chart refresh failed, serving {}s old data: {:#}", pair, age, source);
                    Ok(stale)
                }
                None => Err(ChartError::Provider {
                    pair: pair.to_string(),
                    source,
                }),
            };
        }
    };

    // stamp with the time the fetch finished, not when it started
    let record = ChartRecord::new(config, candles, clock.now());
    store.upsert(pair, &record).await.map_err(ChartError::Store)?;
    info!("{} chart db updated! ({} candles)", pair, record.candles.len());

    store
        .find_one(pair)
        .await
        .map_err(ChartError::Store)?
        .ok_or_else(|| ChartError::Store(anyhow::anyhow!("chart for {} missing after upsert", pair)))
}

/// Chart access for one trading pair
///
/// Holds the collaborators and the pair's config; every call reads the store
/// afresh, so the cache itself has no mutable state.
pub struct ChartCache<S, P, C = SystemClock> {
    store: S,
    provider: P,
    clock: C,
    pair: String,
    config: ChartConfig,
    assembler: IndicatorAssembler,
}

impl<S, P> ChartCache<S, P>
where
    S: ChartStore,
    P: MarketDataProvider,
{
    /// Create a cache for `pair` on the wall clock
    pub fn new(store: S, provider: P, pair: impl Into<String>, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            provider,
            clock: SystemClock,
            pair: pair.into(),
            config,
            assembler: IndicatorAssembler::new(),
        })
    }
}

impl<S, P, C> ChartCache<S, P, C>
where
    S: ChartStore,
    P: MarketDataProvider,
    C: Clock,
{
    /// Swap the time source
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ChartCache<S, P, C2> {
        ChartCache {
            store: self.store,
            provider: self.provider,
            clock,
            pair: self.pair,
            config: self.config,
            assembler: self.assembler,
        }
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Current chart, refreshed if older than [`STALE_AFTER_SECS`]
    pub async fn get_chart(&self) -> ChartResult<ChartRecord> {
        refresh_if_stale(&self.store, &self.provider, &self.pair, &self.config, &self.clock).await
    }

    /// Current candles as a time-indexed table, without indicators
    pub async fn candle_table(&self) -> ChartResult<CandleTable> {
        let record = self.get_chart().await?;
        CandleTable::from_candles(&record.candles)
    }

    /// Current chart with all indicator columns appended, using this cache's window
    pub async fn with_indicators(&self) -> ChartResult<CandleTable> {
        let record = self.get_chart().await?;
        self.assembler.assemble(&record.candles, self.config.window)
    }
}
