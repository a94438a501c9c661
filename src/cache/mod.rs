//! Local caching of the irradiance feed
//!
//! The [`LocalFeedLoader`] coordinates a pluggable [`FeedStore`] with the
//! [`FeedCachePolicy`]: saving replaces the single cached entry, loading
//! returns it only while fresh, and validation clears stale or unreadable
//! entries. Two stores are provided, a JSON file on disk and an in-memory slot.

mod file_store;
mod loader;
mod local;
mod memory_store;
mod policy;
mod store;

pub use file_store::JsonFileFeedStore;
pub use loader::{CacheError, LoadResult, LocalFeedLoader, SaveResult};
pub use local::LocalIrradianceFeed;
pub use memory_store::InMemoryFeedStore;
pub use policy::{FeedCachePolicy, MAX_CACHE_AGE_DAYS};
pub use store::{CachedFeed, FeedStore, StoreError};
