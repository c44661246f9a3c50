//! Cache module for sub-resource responses
//!
//! This module provides a bounded in-memory cache keyed by request URL and a
//! background sweeper that flushes it on a fixed interval. Nothing is written
//! to disk; the cache lives as long as the application.

mod manager;
mod sweeper;

pub use manager::{ResponseCache, DEFAULT_CAPACITY};
pub use sweeper::{SweeperConfig, SweeperHandle, DEFAULT_FLUSH_INTERVAL};
