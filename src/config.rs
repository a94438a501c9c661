//! Runtime configuration derived from CLI arguments

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::climatology_url;
use crate::cache::JsonFileFeedStore;
use crate::cli::Cli;

/// Error types for resolving configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Latitude outside -90..=90
    #[error("Invalid latitude: {0}. Expected a value between -90 and 90")]
    InvalidLatitude(f64),

    /// Longitude outside -180..=180
    #[error("Invalid longitude: {0}. Expected a value between -180 and 180")]
    InvalidLongitude(f64),

    /// No --cache-file given and no home directory to derive one from
    #[error("Could not determine a cache directory; pass --cache-file")]
    NoCacheDirectory,
}

/// Everything the commands need to build loaders and stores
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// URL requested by the remote loader
    pub endpoint: String,
    /// Location of the JSON cache file
    pub cache_file: PathBuf,
    /// Timeout applied to each HTTP request
    pub http_timeout: Duration,
}

impl FeedConfig {
    /// Creates a FeedConfig from parsed CLI arguments
    ///
    /// # Returns
    /// * `Ok(FeedConfig)` with the endpoint and cache location resolved
    /// * `Err(ConfigError)` for out-of-range coordinates or no cache location
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let endpoint = match &cli.url {
            Some(url) => url.clone(),
            None => {
                if !(-90.0..=90.0).contains(&cli.latitude) {
                    return Err(ConfigError::InvalidLatitude(cli.latitude));
                }
                if !(-180.0..=180.0).contains(&cli.longitude) {
                    return Err(ConfigError::InvalidLongitude(cli.longitude));
                }
                climatology_url(cli.latitude, cli.longitude)
            }
        };

        let cache_file = match &cli.cache_file {
            Some(path) => path.clone(),
            None => JsonFileFeedStore::default_path().ok_or(ConfigError::NoCacheDirectory)?,
        };

        Ok(FeedConfig {
            endpoint,
            cache_file,
            http_timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
