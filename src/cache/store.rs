//! Storage abstraction for the single cached feed

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::local::LocalIrradianceFeed;

/// The cached feed together with the moment it was inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedFeed {
    /// The cached data
    pub feed: LocalIrradianceFeed,
    /// When the data was cached
    pub timestamp: DateTime<Utc>,
}

/// Errors surfaced by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium could not be read or written
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored bytes could not be decoded
    #[error("Cache is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    /// The store can no longer accept operations
    #[error("Cache store is closed")]
    Closed,
}

/// Persists at most one cached feed
///
/// Implementations must run operations issued against the same instance in a
/// single total order. Results may be delivered on any thread.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Returns the cached entry, or `None` when nothing is cached
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError>;

    /// Replaces any cached entry with `feed` stamped at `timestamp`
    async fn insert(
        &self,
        feed: LocalIrradianceFeed,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Removes the cached entry; succeeds when nothing is cached
    async fn delete_cached_feed(&self) -> Result<(), StoreError>;
}
