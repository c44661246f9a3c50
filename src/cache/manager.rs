//! In-memory cache for sub-resource responses
//!
//! Provides a `ResponseCache` that maps request URLs to parsed JSON documents.
//! The cache is bounded: once it holds more than `capacity` entries the
//! oldest inserted entry is evicted. Lookups do not refresh an entry's
//! position, so this is a FIFO cache, not an LRU.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::data::{FetchError, Transport};

/// Default maximum number of cached responses
pub const DEFAULT_CAPACITY: usize = 100;

/// A cached response
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The parsed document
    data: Value,
    /// When the document was fetched
    cached_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order; front is evicted first
    order: VecDeque<String>,
    last_flush: Option<DateTime<Utc>>,
}

/// Bounded URL -> JSON cache shared across fetches
///
/// Clone is cheap and clones share the same entries. The lock is never held
/// across a network call.
#[derive(Clone)]
pub struct ResponseCache {
    state: Arc<Mutex<CacheState>>,
    transport: Arc<dyn Transport>,
    capacity: usize,
}

impl ResponseCache {
    /// Creates a cache with the default capacity of 100 entries
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_capacity(transport, DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries
    pub fn with_capacity(transport: Arc<dyn Transport>, capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState::default())),
            transport,
            capacity: capacity.max(1),
        }
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached document for `url`, fetching it on a miss
    ///
    /// # Returns
    /// * `Ok(Value)` - The cached or freshly fetched document
    /// * `Err(FetchError)` - If the fetch fails; failures are not cached
    pub async fn get_or_fetch(&self, url: &str) -> Result<Value, FetchError> {
        let cached = self
            .state()
            .entries
            .get(url)
            .map(|entry| (entry.data.clone(), entry.cached_at));
        if let Some((data, cached_at)) = cached {
            let age_secs = (Utc::now() - cached_at).num_seconds();
            debug!(url, age_secs, "cache hit");
            return Ok(data);
        }

        debug!(url, "cache miss");
        let data = self.transport.get_json(url).await?;
        self.insert(url, data.clone());
        Ok(data)
    }

    /// Stores `data` under `url`, evicting the oldest entry when over capacity
    fn insert(&self, url: &str, data: Value) {
        let mut state = self.state();
        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
        };

        // A concurrent miss for the same URL may already have stored it
        if state.entries.insert(url.to_string(), entry).is_none() {
            state.order.push_back(url.to_string());
        }

        if state.entries.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
                debug!(url = %oldest, "evicted oldest cache entry");
            }
        }
    }

    /// Removes every entry, returning how many were dropped
    pub fn clear(&self) -> usize {
        let mut state = self.state();
        let dropped = state.entries.len();
        state.entries.clear();
        state.order.clear();
        state.last_flush = Some(Utc::now());
        info!(dropped, "response cache cleared");
        dropped
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `url` is currently cached
    pub fn contains(&self, url: &str) -> bool {
        self.state().entries.contains_key(url)
    }

    /// Maximum number of entries kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// When the cache was last cleared, if ever
    pub fn last_flush(&self) -> Option<DateTime<Utc>> {
        self.state().last_flush
    }
}
