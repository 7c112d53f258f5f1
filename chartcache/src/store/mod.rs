//! Chart document storage
//!
//! One [`ChartRecord`] per trading pair. `find_one` distinguishes a missing
//! record (`Ok(None)`) from a store that cannot be read (`Err`).

pub mod memory_store;
pub mod redis_store;

pub use memory_store::*;
pub use redis_store::*;

use crate::data::ChartRecord;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ChartStore: Send + Sync {
    /// Stored record for `pair`, if any
    async fn find_one(&self, pair: &str) -> Result<Option<ChartRecord>>;

    /// Replace (or create) the whole record for `pair`
    async fn upsert(&self, pair: &str, record: &ChartRecord) -> Result<()>;
}

#[async_trait]
impl<T: ChartStore + ?Sized> ChartStore for Arc<T> {
    async fn find_one(&self, pair: &str) -> Result<Option<ChartRecord>> {
        (**self).find_one(pair).await
    }

    async fn upsert(&self, pair: &str, record: &ChartRecord) -> Result<()> {
        (**self).upsert(pair, record).await
    }
}
