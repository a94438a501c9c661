//! Command-line interface parsing for pvfeed
//!
//! Handles the global options that locate the API endpoint and the cache file,
//! and the subcommands that drive the remote loader and the cache coordinator.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::endpoint::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

/// pvfeed - Solar irradiance climatology with a local cache
#[derive(Parser, Debug)]
#[command(name = "pvfeed")]
#[command(about = "Fetch and cache NASA POWER solar irradiance climatology")]
#[command(version)]
pub struct Cli {
    /// Latitude of the point to query
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true, global = true)]
    pub latitude: f64,

    /// Longitude of the point to query
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true, global = true)]
    pub longitude: f64,

    /// Full endpoint URL; overrides --latitude and --longitude
    #[arg(long, env = "PVFEED_URL", global = true)]
    pub url: Option<String>,

    /// Location of the cache file (defaults to the XDG cache directory)
    #[arg(long, env = "PVFEED_CACHE_FILE", value_name = "PATH", global = true)]
    pub cache_file: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS", global = true)]
    pub timeout_secs: u64,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch the feed from the API without touching the cache
    Fetch,
    /// Print the cached feed if fresh, or an empty feed otherwise
    Load,
    /// Fetch the feed from the API and replace the cached copy
    Refresh,
    /// Delete the cached feed if it is stale or unreadable
    Validate,
    /// Delete the cached feed
    Clear,
}
