//! In-memory chart storage

use crate::data::ChartRecord;
use crate::store::ChartStore;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store, one record per pair
#[derive(Debug, Default)]
pub struct InMemoryChartStore {
    charts: RwLock<HashMap<String, ChartRecord>>,
}

impl InMemoryChartStore {
    /// Create new storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of stored charts
    pub async fn len(&self) -> usize {
        self.charts.read().await.len()
    }

    /// Check if storage is empty
    pub async fn is_empty(&self) -> bool {
        self.charts.read().await.is_empty()
    }

    /// Clear all data
    pub async fn clear(&self) {
        self.charts.write().await.clear();
    }
}

#[async_trait]
impl ChartStore for InMemoryChartStore {
    async fn find_one(&self, pair: &str) -> Result<Option<ChartRecord>> {
        Ok(self.charts.read().await.get(pair).cloned())
    }

    async fn upsert(&self, pair: &str, record: &ChartRecord) -> Result<()> {
        self.charts
            .write()
            .await
            .insert(pair.to_string(), record.clone());
        Ok(())
    }
}
