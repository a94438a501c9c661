//! Feed store persisting the cached feed as a JSON file
//!
//! All file access happens on one worker task that receives commands over a
//! channel, so operations run strictly in the order they were issued no matter
//! how many callers share the store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use tokio::fs;
use tokio::sync::{mpsc, oneshot};

use super::local::LocalIrradianceFeed;
use super::store::{CachedFeed, FeedStore, StoreError};

/// File name used inside the XDG cache directory
const CACHE_FILE_NAME: &str = "feed.json";

type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

/// Work items handled by the store worker
enum Command {
    Retrieve(Reply<Option<CachedFeed>>),
    Insert { cache: CachedFeed, reply: Reply<()> },
    Delete(Reply<()>),
}

/// Stores the cached feed in a single JSON file
///
/// The file holds `{"feed": ..., "timestamp": ...}`. Inserts go through a
/// temporary file and a rename so readers never see a partial write.
#[derive(Debug, Clone)]
pub struct JsonFileFeedStore {
    /// Location of the cache file
    path: PathBuf,
    /// Queue feeding the worker task
    sender: mpsc::UnboundedSender<Command>,
}

impl JsonFileFeedStore {
    /// Creates a store backed by `path` and spawns its worker
    ///
    /// The worker stops once every clone of the store has been dropped.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(run_worker(path.clone(), receiver));

        Self { path, sender }
    }

    /// XDG-compliant location of the cache file
    ///
    /// Uses `~/.cache/pvfeed/feed.json` on Linux, or the equivalent on other
    /// platforms. Returns `None` if no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "pvfeed")?;
        Some(project_dirs.cache_dir().join(CACHE_FILE_NAME))
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T, StoreError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Closed)?
    }
}

#[async_trait]
impl FeedStore for JsonFileFeedStore {
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        self.request(Command::Retrieve).await
    }

    async fn insert(
        &self,
        feed: LocalIrradianceFeed,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let cache = CachedFeed { feed, timestamp };
        self.request(|reply| Command::Insert { cache, reply }).await
    }

    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        self.request(Command::Delete).await
    }
}

async fn run_worker(path: PathBuf, mut receiver: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = receiver.recv().await {
        match command {
            Command::Retrieve(reply) => {
                let _ = reply.send(read_cache(&path).await);
            }
            Command::Insert { cache, reply } => {
                let _ = reply.send(write_cache(&path, &cache).await);
            }
            Command::Delete(reply) => {
                let _ = reply.send(remove_cache(&path).await);
            }
        }
    }
    tracing::debug!(path = %path.display(), "feed store worker stopped");
}

async fn read_cache(path: &Path) -> Result<Option<CachedFeed>, StoreError> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no cached feed");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let cache: CachedFeed = serde_json::from_slice(&content)?;
    tracing::debug!(path = %path.display(), timestamp = %cache.timestamp, "cached feed read");
    Ok(Some(cache))
}

async fn write_cache(path: &Path, cache: &CachedFeed) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }

    let json = serde_json::to_vec_pretty(cache)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json).await?;
    fs::rename(&staging, path).await?;

    tracing::debug!(path = %path.display(), timestamp = %cache.timestamp, "cached feed written");
    Ok(())
}

async fn remove_cache(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "cached feed deleted");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
