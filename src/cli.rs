//! Command-line interface parsing for the starship explorer
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --open flag that starts the app on a shared link, and turns them into a
//! validated startup configuration.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_FLUSH_INTERVAL};
use crate::data::DEFAULT_BASE_URL;
use crate::route::{Route, RouteError};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The --open link does not name a screen
    #[error("Invalid link '{link}': {source}")]
    InvalidLink {
        link: String,
        #[source]
        source: RouteError,
    },

    /// The --base-url is not an http(s) URL
    #[error("Invalid base URL: '{0}'")]
    InvalidBaseUrl(String),

    /// The cache must hold at least one entry
    #[error("Cache capacity must be at least 1")]
    ZeroCapacity,

    /// The flush interval must be positive
    #[error("Flush interval must be at least 1 second")]
    ZeroFlushInterval,
}

/// Starship explorer - browse SWAPI starships in the terminal
#[derive(Parser, Debug)]
#[command(name = "starships")]
#[command(about = "Browse, filter and inspect Star Wars starships from SWAPI")]
#[command(version)]
pub struct Cli {
    /// Open a link directly instead of the landing screen
    ///
    /// Examples:
    ///   starships --open /dashboard?search=wing&sort=desc
    ///   starships --open /starship/10?showFilms=false
    #[arg(long, value_name = "LINK")]
    pub open: Option<String>,

    /// Base URL of the SWAPI deployment
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Maximum number of cached pilot/film responses
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    /// Seconds between full flushes of the response cache
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_FLUSH_INTERVAL.as_secs())]
    pub flush_interval: u64,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// SWAPI base URL without a trailing slash
    pub base_url: String,
    /// Response cache bound
    pub cache_capacity: usize,
    /// Time between cache flushes
    pub flush_interval: Duration,
    /// Screen shown first
    pub initial_route: Route,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_capacity: DEFAULT_CAPACITY,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            initial_route: Route::Landing,
        }
    }
}

/// Parses the --open argument into a route.
///
/// # Returns
/// * `Ok(Route)` if the link names a screen
/// * `Err(CliError::InvalidLink)` otherwise
pub fn parse_link_arg(link: &str) -> Result<Route, CliError> {
    Route::parse(link).map_err(|source| CliError::InvalidLink {
        link: link.to_string(),
        source,
    })
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if any argument is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base_url = match Url::parse(&cli.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                cli.base_url.trim_end_matches('/').to_string()
            }
            _ => return Err(CliError::InvalidBaseUrl(cli.base_url.clone())),
        };

        if cli.cache_capacity == 0 {
            return Err(CliError::ZeroCapacity);
        }
        if cli.flush_interval == 0 {
            return Err(CliError::ZeroFlushInterval);
        }

        let initial_route = match &cli.open {
            Some(link) => parse_link_arg(link)?,
            None => Route::Landing,
        };

        Ok(StartupConfig {
            base_url,
            cache_capacity: cli.cache_capacity,
            flush_interval: Duration::from_secs(cli.flush_interval),
            initial_route,
        })
    }
}
