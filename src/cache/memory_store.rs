//! Single-slot feed store held in memory

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::local::LocalIrradianceFeed;
use super::store::{CachedFeed, FeedStore, StoreError};

/// Keeps the cached feed in process memory
///
/// Useful when persistence across runs is not wanted. The fair async mutex
/// grants access in request order, which serializes operations.
#[derive(Debug, Default)]
pub struct InMemoryFeedStore {
    slot: Mutex<Option<CachedFeed>>,
}

impl InMemoryFeedStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn insert(
        &self,
        feed: LocalIrradianceFeed,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        *self.slot.lock().await = Some(CachedFeed { feed, timestamp });
        Ok(())
    }

    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        self.slot.lock().await.take();
        Ok(())
    }
}
