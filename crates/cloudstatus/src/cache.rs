//! In-memory TTL cache with pattern invalidation.
//!
//! One cache instance serves every service, so values are stored type-erased
//! and checked on the way out. Expired entries are evicted lazily when read,
//! or in bulk by [`TtlCache::clean_expired`].
//!
//! Concurrent misses on the same key are not coalesced: each caller runs its
//! own fetcher and the last write wins.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use regex::Regex;
use serde::Serialize;
use tokio::time::Instant;

use crate::error::{StatusError, StatusResult};

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Snapshot of a single cache entry.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryStats {
    pub key: String,
    pub expires_in_ms: u64,
}

/// Snapshot of the whole cache.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub name: String,
    pub size: usize,
    pub entries: Vec<CacheEntryStats>,
}

/// Key/value store where every entry carries its own expiry.
pub struct TtlCache {
    name: String,
    entries: DashMap<String, CacheEntry>,
}

impl TtlCache {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the cached value for `key`, or run `fetcher` once and cache its
    /// result for `ttl`. Fetch errors propagate and nothing is stored.
    pub async fn get<T, F, Fut>(&self, key: &str, ttl: Duration, fetcher: F) -> StatusResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = StatusResult<T>>,
    {
        if let Some(value) = self.get_direct::<T>(key)? {
            tracing::debug!("Cache hit for key: {key} ({})", self.name);
            return Ok(value);
        }

        tracing::debug!("Cache miss for key: {key} ({})", self.name);
        let value = fetcher().await?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set<T>(&self, key: &str, value: T, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        let expires_at = Instant::now() + ttl;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: Arc::new(value),
                expires_at,
            },
        );
        tracing::debug!(
            "Cache set for key: {key} ({}), ttl {}ms",
            self.name,
            ttl.as_millis()
        );
    }

    /// True if `key` holds an unexpired entry. Expired entries are evicted.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };

        if expired {
            self.evict_if_expired(key, now);
            return false;
        }
        true
    }

    /// Read a value without fetching. Expired entries are evicted.
    ///
    /// Fails with a cache error when the stored value is not a `T`.
    pub fn get_direct<T>(&self, key: &str) -> StatusResult<Option<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let now = Instant::now();
        let value = match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => None,
            Some(entry) => Some(Arc::clone(&entry.value)),
            None => return Ok(None),
        };

        let Some(value) = value else {
            self.evict_if_expired(key, now);
            return Ok(None);
        };

        value
            .downcast_ref::<T>()
            .cloned()
            .map(Some)
            .ok_or_else(|| StatusError::Cache {
                key: key.to_string(),
                message: format!(
                    "stored value is not a {}",
                    std::any::type_name::<T>()
                ),
            })
    }

    /// Remove `key`. Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        let deleted = self.entries.remove(key).is_some();
        if deleted {
            tracing::debug!("Cache delete for key: {key} ({})", self.name);
        }
        deleted
    }

    /// Remove every entry and return how many were dropped.
    pub fn clear(&self) -> usize {
        let size = self.entries.len();
        self.entries.clear();
        tracing::info!("Cache cleared ({}): {size} entries", self.name);
        size
    }

    /// Sweep all expired entries and return how many were removed.
    pub fn clean_expired(&self) -> usize {
        let now = Instant::now();
        let mut cleaned = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                cleaned += 1;
            }
            keep
        });

        if cleaned > 0 {
            tracing::debug!("Cleaned {cleaned} expired cache entries ({})", self.name);
        }
        cleaned
    }

    /// Remove every entry whose key matches `pattern`.
    pub fn invalidate_pattern(&self, pattern: &Regex) -> usize {
        let mut invalidated = 0;
        self.entries.retain(|key, _| {
            let keep = !pattern.is_match(key);
            if !keep {
                invalidated += 1;
            }
            keep
        });

        if invalidated > 0 {
            tracing::info!(
                "Invalidated {invalidated} cache entries matching /{pattern}/ ({})",
                self.name
            );
        }
        invalidated
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let mut entries: Vec<CacheEntryStats> = self
            .entries
            .iter()
            .map(|entry| CacheEntryStats {
                key: entry.key().clone(),
                expires_in_ms: entry
                    .value()
                    .expires_at
                    .saturating_duration_since(now)
                    .as_millis() as u64,
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        CacheStats {
            name: self.name.clone(),
            size: entries.len(),
            entries,
        }
    }

    // Only removes the entry if it is still expired, so a concurrent refresh
    // between the read and the eviction survives.
    fn evict_if_expired(&self, key: &str, now: Instant) {
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            tracing::debug!("Cache entry expired: {key} ({})", self.name);
        }
    }
}
