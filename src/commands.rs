//! Execution of CLI subcommands against the remote loader and the cache

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::api::{HttpClient, HttpError, RemoteFeedLoader, RemoteLoaderError, ReqwestHttpClient};
use crate::cache::{CacheError, FeedStore, JsonFileFeedStore, LocalFeedLoader, StoreError};
use crate::cli::Command;
use crate::config::FeedConfig;
use crate::feed::IrradianceFeed;

/// Errors surfaced by a subcommand
#[derive(Debug, Error)]
pub enum CommandError {
    /// The HTTP client could not be built
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Fetching the remote feed failed
    #[error(transparent)]
    Remote(#[from] RemoteLoaderError),

    /// A cache operation failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The store failed outside the coordinator
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Remote loader and cache coordinator wired together for the CLI
pub struct FeedService {
    remote: RemoteFeedLoader,
    local: LocalFeedLoader,
    store: Arc<dyn FeedStore>,
}

impl FeedService {
    /// Wires the production HTTP client and JSON file store from `config`
    pub fn from_config(config: &FeedConfig) -> Result<Self, CommandError> {
        let client = ReqwestHttpClient::with_timeout(config.http_timeout)?;
        let store = JsonFileFeedStore::new(config.cache_file.clone());
        Ok(Self::new(
            &config.endpoint,
            Arc::new(client),
            Arc::new(store),
        ))
    }

    /// Wires arbitrary collaborators; the cache is timestamped with `Utc::now`
    pub fn new(endpoint: &str, client: Arc<dyn HttpClient>, store: Arc<dyn FeedStore>) -> Self {
        Self {
            remote: RemoteFeedLoader::new(endpoint, client),
            local: LocalFeedLoader::new(Arc::clone(&store), Utc::now),
            store,
        }
    }

    /// Runs `command`, returning the feed to print if it produces one
    pub async fn run(&self, command: Command) -> Result<Option<IrradianceFeed>, CommandError> {
        match command {
            Command::Fetch => Ok(Some(self.remote.load().await?)),
            Command::Load => Ok(Some(self.local.load_feed().await?)),
            Command::Refresh => {
                let feed = self.remote.load().await?;
                self.local.save_feed(&feed).await?;
                Ok(Some(feed))
            }
            Command::Validate => {
                self.local.validate().await?;
                Ok(None)
            }
            Command::Clear => {
                self.store.delete_cached_feed().await?;
                tracing::info!("cached feed cleared");
                Ok(None)
            }
        }
    }
}
