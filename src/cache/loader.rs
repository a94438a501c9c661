//! Cache coordinator for the irradiance feed
//!
//! `LocalFeedLoader` turns store operations and the cache policy into three use
//! cases: save, load and validate. Each use case runs as a spawned task and
//! reports back through a completion closure. Once the loader is dropped, any
//! task still waiting on the store finishes silently: no completion is called
//! and no follow-up store operation is issued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::local::LocalIrradianceFeed;
use super::policy::FeedCachePolicy;
use super::store::{FeedStore, StoreError};
use crate::feed::IrradianceFeed;

/// Outcome of [`LocalFeedLoader::save`]
pub type SaveResult = Result<(), StoreError>;

/// Outcome of [`LocalFeedLoader::load`]
pub type LoadResult = Result<IrradianceFeed, StoreError>;

type CurrentDate = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Errors from the awaitable wrappers around the completion API
#[derive(Debug, Error)]
pub enum CacheError {
    /// The store reported a failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation ended without reporting a result
    #[error("Cache operation ended without a result")]
    Abandoned,
}

/// Shared flag that goes false when the owning loader is dropped
#[derive(Clone)]
struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates the feed cache
///
/// The loader is not `Clone`: dropping it ends every in-flight use case. Share
/// it behind an `Arc` to use it from several places.
///
/// All use cases spawn onto the current Tokio runtime and return the task's
/// `JoinHandle`, which may be awaited or ignored.
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStore>,
    current_date: CurrentDate,
    liveness: Liveness,
}

impl LocalFeedLoader {
    /// Creates a loader over `store`, timestamping saves with `current_date`
    pub fn new<F>(store: Arc<dyn FeedStore>, current_date: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            store,
            current_date: Arc::new(current_date),
            liveness: Liveness::new(),
        }
    }

    /// Replaces the cached feed with `feed`
    ///
    /// The existing entry is deleted first. Insertion is only attempted after
    /// the deletion succeeded; a deletion error is delivered as the result.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn save<F>(&self, feed: &IrradianceFeed, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(SaveResult) + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let current_date = Arc::clone(&self.current_date);
        let liveness = self.liveness.clone();
        let local = LocalIrradianceFeed::from(feed);

        tokio::spawn(async move {
            let deletion = store.delete_cached_feed().await;
            if !liveness.is_alive() {
                return;
            }
            if let Err(error) = deletion {
                tracing::info!(%error, "cache deletion failed, feed not saved");
                completion(Err(error));
                return;
            }

            let insertion = store.insert(local, current_date()).await;
            if !liveness.is_alive() {
                return;
            }
            match &insertion {
                Ok(()) => tracing::info!("feed cached"),
                Err(error) => tracing::info!(%error, "cache insertion failed"),
            }
            completion(insertion);
        })
    }

    /// Loads the cached feed if it is still fresh
    ///
    /// An empty cache and a stale entry both produce
    /// [`IrradianceFeed::empty`]; only store failures are errors. Loading
    /// never modifies the store.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn load<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let current_date = Arc::clone(&self.current_date);
        let liveness = self.liveness.clone();

        tokio::spawn(async move {
            let retrieval = store.retrieve().await;
            if !liveness.is_alive() {
                return;
            }

            let result = match retrieval {
                Err(error) => Err(error),
                Ok(Some(cache)) if FeedCachePolicy::validate(cache.timestamp, current_date()) => {
                    tracing::info!(timestamp = %cache.timestamp, "fresh cached feed found");
                    Ok(cache.feed.into())
                }
                Ok(Some(cache)) => {
                    tracing::info!(timestamp = %cache.timestamp, "cached feed is stale");
                    Ok(IrradianceFeed::empty())
                }
                Ok(None) => Ok(IrradianceFeed::empty()),
            };
            completion(result);
        })
    }

    /// Deletes the cached feed when it is stale or cannot be read
    ///
    /// Fire-and-forget: deletion failures are logged and otherwise ignored.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn validate_cache(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let current_date = Arc::clone(&self.current_date);
        let liveness = self.liveness.clone();

        tokio::spawn(async move {
            let retrieval = store.retrieve().await;
            if !liveness.is_alive() {
                return;
            }

            let should_delete = match &retrieval {
                Err(error) => {
                    tracing::warn!(%error, "cached feed unreadable, deleting");
                    true
                }
                Ok(Some(cache)) if !FeedCachePolicy::validate(cache.timestamp, current_date()) => {
                    tracing::info!(timestamp = %cache.timestamp, "deleting stale cached feed");
                    true
                }
                Ok(_) => false,
            };

            if should_delete {
                if let Err(error) = store.delete_cached_feed().await {
                    tracing::warn!(%error, "failed to delete cached feed");
                }
            }
        })
    }

    /// Awaitable form of [`save`](Self::save)
    pub async fn save_feed(&self, feed: &IrradianceFeed) -> Result<(), CacheError> {
        let (sender, receiver) = oneshot::channel();
        self.save(feed, move |result| {
            let _ = sender.send(result);
        });
        receiver.await.map_err(|_| CacheError::Abandoned)??;
        Ok(())
    }

    /// Awaitable form of [`load`](Self::load)
    pub async fn load_feed(&self) -> Result<IrradianceFeed, CacheError> {
        let (sender, receiver) = oneshot::channel();
        self.load(move |result| {
            let _ = sender.send(result);
        });
        Ok(receiver.await.map_err(|_| CacheError::Abandoned)??)
    }

    /// Runs [`validate_cache`](Self::validate_cache) and waits for it
    pub async fn validate(&self) -> Result<(), CacheError> {
        self.validate_cache()
            .await
            .map_err(|_| CacheError::Abandoned)
    }
}

impl Drop for LocalFeedLoader {
    fn drop(&mut self) {
        self.liveness.revoke();
    }
}
