//! Time-to-live cache for upstream lookups.
//!
//! Entries record when they were fetched and are served without touching
//! the network while younger than the TTL. Expired entries are kept rather
//! than evicted: if the refresh fails, the stale value is served instead,
//! so one failed upstream call does not blank out data we already had.
//!
//! The lock guarding the map is only held to read or install an entry,
//! never across the fetch itself, so a slow upstream for one key does not
//! stall lookups of other keys.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

/// Configuration for a TTL cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long an entry is served without refetching.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// A cached value and when it was fetched. Never partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    /// Valid iff `now - fetched_at < ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            // Longer than chrono can represent: never expires.
            return true;
        };
        now - self.fetched_at < ttl
    }
}

/// Where a [`TtlCache::lookup`] result came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    /// Cached entry still within its TTL.
    Hit(V),
    /// Freshly fetched and installed.
    Fetched(V),
    /// Refresh failed; the expired entry was served instead.
    Stale(V),
}

impl<V> Lookup<V> {
    pub fn into_value(self) -> V {
        match self {
            Lookup::Hit(v) | Lookup::Fetched(v) | Lookup::Stale(v) => v,
        }
    }
}

/// Key → value cache with per-entry expiry and stale-on-error reads.
pub struct TtlCache<K, V> {
    entries: MokaCache<K, Arc<CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new cache with the given configuration.
    ///
    /// The backing store has no time-based eviction: expiry is decided
    /// per lookup so expired entries remain available as a fallback.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self {
            entries,
            ttl: config.ttl,
        }
    }

    /// The configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `key` with the configured TTL, fetching on a miss.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: std::fmt::Display,
    {
        self.lookup(key, Utc::now(), self.ttl, fetch)
            .await
            .map(Lookup::into_value)
    }

    /// Look up `key` as of `now`.
    ///
    /// Returns the cached value if it is younger than `ttl`. Otherwise calls
    /// `fetch`; on success the result replaces any prior entry, on failure
    /// the prior entry is served if there is one, else the error is returned.
    ///
    /// A fetched entry is stamped with `now` plus the time the fetch took, so
    /// a slow upstream does not eat into the entry's TTL.
    pub async fn lookup<F, Fut, E>(
        &self,
        key: K,
        now: DateTime<Utc>,
        ttl: Duration,
        fetch: F,
    ) -> Result<Lookup<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: std::fmt::Display,
    {
        let prior = self.entries.get(&key).await;

        if let Some(entry) = prior.as_ref().filter(|e| e.is_fresh(now, ttl)) {
            debug!(?key, "cache hit");
            return Ok(Lookup::Hit(entry.value.clone()));
        }

        debug!(?key, stale = prior.is_some(), "cache miss");

        let started = Instant::now();
        match fetch().await {
            Ok(value) => {
                let took = chrono::Duration::from_std(started.elapsed())
                    .unwrap_or_else(|_| chrono::Duration::zero());
                let entry = Arc::new(CacheEntry {
                    value: value.clone(),
                    fetched_at: now + took,
                });
                self.entries.insert(key, entry).await;
                Ok(Lookup::Fetched(value))
            }
            Err(e) => match prior {
                Some(entry) => {
                    warn!(?key, error = %e, fetched_at = %entry.fetched_at, "refresh failed, serving stale entry");
                    Ok(Lookup::Stale(entry.value.clone()))
                }
                None => Err(e),
            },
        }
    }

    /// The raw entry for `key`, fresh or not.
    #[cfg(test)]
    pub async fn peek(&self, key: &K) -> Option<CacheEntry<V>> {
        self.entries.get(key).await.map(|e| (*e).clone())
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Remove every entry.
    ///
    /// Takes effect for all subsequent lookups at once; a lookup racing the
    /// clear sees either the whole old entry or none, never a mix.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}
