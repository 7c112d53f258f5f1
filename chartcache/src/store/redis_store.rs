//! Redis chart storage
//!
//! Each pair's record is one JSON document under `markets:chart:<PAIR>`, so
//! an upsert is a single `SET`.

use crate::data::ChartRecord;
use crate::store::ChartStore;
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

pub const DEFAULT_KEY_PREFIX: &str = "markets:chart";

pub struct RedisChartStore {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisChartStore {
    /// Open a multiplexed connection on `client`
    pub async fn connect(client: redis::Client) -> Result<Self> {
        info!("Connecting to chart store via Redis");
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("failed to connect to redis")?;
        Ok(Self::with_connection(conn))
    }

    pub fn with_connection(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Store documents under a different key prefix
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, pair: &str) -> String {
        chart_key(&self.key_prefix, pair)
    }
}

fn chart_key(prefix: &str, pair: &str) -> String {
    format!("{}:{}", prefix, pair)
}

#[async_trait]
impl ChartStore for RedisChartStore {
    async fn find_one(&self, pair: &str) -> Result<Option<ChartRecord>> {
        let key = self.key(pair);
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn
            .get(&key)
            .await
            .with_context(|| format!("GET {} failed", key))?;

        payload
            .map(|s| {
                serde_json::from_str::<ChartRecord>(&s)
                    .with_context(|| format!("chart document {} is unreadable", key))
            })
            .transpose()
    }

    async fn upsert(&self, pair: &str, record: &ChartRecord) -> Result<()> {
        let key = self.key(pair);
        let payload = serde_json::to_string(record)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(&key, payload)
            .await
            .with_context(|| format!("SET {} failed", key))?;
        Ok(())
    }
}
