//! pvfeed library
//!
//! Fetches NASA POWER solar irradiance climatology and keeps a local copy that
//! stays valid for seven days. The modules are exposed for the binary and for
//! integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod feed;
