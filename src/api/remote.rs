//! Loader that fetches the irradiance feed over HTTP

use std::sync::Arc;

use thiserror::Error;

use super::http::{HttpClient, HttpError};
use super::mapper::{FeedItemsMapper, MapperError};
use crate::feed::IrradianceFeed;

/// Errors that can occur when loading the remote feed
#[derive(Debug, Error)]
pub enum RemoteLoaderError {
    /// No response was received
    #[error("Connectivity error: {0}")]
    Connectivity(#[source] HttpError),

    /// A response was received but could not be turned into a feed
    #[error("Invalid data: {0}")]
    InvalidData(#[from] MapperError),
}

/// Fetches one URL and maps the response to an [`IrradianceFeed`]
///
/// Each call to [`load`](Self::load) issues exactly one request. There is no
/// retry; any failure is final for that call.
#[derive(Clone)]
pub struct RemoteFeedLoader {
    url: String,
    client: Arc<dyn HttpClient>,
}

impl RemoteFeedLoader {
    /// Create a loader for `url` using the given HTTP capability
    pub fn new(url: impl Into<String>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// The URL this loader requests
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and map the feed
    ///
    /// # Returns
    /// * `Ok(IrradianceFeed)` - 200 response with a well-formed body
    /// * `Err(RemoteLoaderError::Connectivity)` - the HTTP capability failed
    /// * `Err(RemoteLoaderError::InvalidData)` - bad status or undecodable body
    pub async fn load(&self) -> Result<IrradianceFeed, RemoteLoaderError> {
        let response = self
            .client
            .get(&self.url)
            .await
            .map_err(RemoteLoaderError::Connectivity)?;

        let feed = FeedItemsMapper::map(&response.body, response.status)?;
        tracing::info!(
            coordinates = ?feed.geometry.coordinates,
            "remote feed loaded"
        );

        Ok(feed)
    }
}
