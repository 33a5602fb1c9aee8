// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LRU cache for whole-collection list lookups.
//!
//! Entries expire a fixed time after insertion regardless of how often they
//! are read. Writers invalidate the affected key instead of updating it.
//! Readers that load from the store take a [`ListCache::generation`] first and
//! store with [`ListCache::put_if_current`], so a list loaded before an
//! invalidation is never cached after it.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

/// Cache key for the full trainer list.
pub const TRAINERS_CACHE_KEY: &str = "trainers_all";

/// Default time-to-live for cached lists.
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(5 * 60);

/// Cached entry: list of records + insertion timestamp.
struct CacheEntry<T> {
    items: Vec<T>,
    inserted_at: Instant,
}

/// In-process LRU cache of record lists keyed by name.
pub struct ListCache<T> {
    cache: Mutex<LruCache<&'static str, CacheEntry<T>>>,
    ttl: Duration,
    /// Bumped by every invalidation, under the cache lock.
    generation: AtomicU64,
}

impl<T: Clone> ListCache<T> {
    /// Create a new cache with the given capacity and TTL.
    ///
    /// - `capacity`: Max number of lists to cache.
    /// - `ttl`: Absolute expiration measured from insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    /// Get the cached list for `key`.
    ///
    /// Returns `None` if not cached or expired.
    pub fn get(&self, key: &'static str) -> Option<Vec<T>> {
        let mut cache = self.cache.lock().ok()?;
        if let Some(entry) = cache.get(&key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.items.clone());
            }
            // Expired: evict
            cache.pop(&key);
        }
        None
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Store the list for `key` only if nothing was invalidated since
    /// `generation` was read. Returns whether the list was stored.
    pub fn put_if_current(&self, key: &'static str, items: Vec<T>, generation: u64) -> bool {
        let Ok(mut cache) = self.cache.lock() else {
            return false;
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        cache.put(
            key,
            CacheEntry {
                items,
                inserted_at: Instant::now(),
            },
        );
        true
    }

    /// Invalidate the cached list for `key`.
    pub fn invalidate(&self, key: &'static str) {
        if let Ok(mut cache) = self.cache.lock() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            cache.pop(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trainer;
    use crate::storage::Entity;

    #[test]
    fn cache_put_and_get() {
        let cache = ListCache::new(4, DEFAULT_LIST_TTL);
        assert!(cache.get(TRAINERS_CACHE_KEY).is_none());

        cache.put_if_current(TRAINERS_CACHE_KEY, Trainer::seed(), cache.generation());

        let result = cache.get(TRAINERS_CACHE_KEY).unwrap();
        assert_eq!(result, Trainer::seed());
    }

    #[test]
    fn cache_invalidate() {
        let cache = ListCache::new(4, DEFAULT_LIST_TTL);
        cache.put_if_current(TRAINERS_CACHE_KEY, Trainer::seed(), cache.generation());
        assert!(cache.get(TRAINERS_CACHE_KEY).is_some());

        cache.invalidate(TRAINERS_CACHE_KEY);
        assert!(cache.get(TRAINERS_CACHE_KEY).is_none());
    }

    #[test]
    fn load_started_before_invalidate_is_not_cached() {
        let cache = ListCache::new(4, DEFAULT_LIST_TTL);
        let generation = cache.generation();

        // A writer lands between the store read and the cache write.
        cache.invalidate(TRAINERS_CACHE_KEY);

        assert!(!cache.put_if_current(TRAINERS_CACHE_KEY, Trainer::seed(), generation));
        assert!(cache.get(TRAINERS_CACHE_KEY).is_none());

        let generation = cache.generation();
        assert!(cache.put_if_current(TRAINERS_CACHE_KEY, Trainer::seed(), generation));
        assert_eq!(cache.get(TRAINERS_CACHE_KEY), Some(Trainer::seed()));
    }

    #[test]
    fn cache_ttl_expiry() {
        let cache = ListCache::new(4, Duration::from_millis(1));
        cache.put_if_current(TRAINERS_CACHE_KEY, Trainer::seed(), cache.generation());

        // Wait for TTL to expire
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get(TRAINERS_CACHE_KEY).is_none());
    }

    #[test]
    fn reads_do_not_extend_expiry() {
        let cache = ListCache::new(4, Duration::from_millis(30));
        cache.put_if_current(TRAINERS_CACHE_KEY, vec![1, 2, 3], cache.generation());

        std::thread::sleep(Duration::from_millis(15));
        assert!(cache.get(TRAINERS_CACHE_KEY).is_some());
        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get(TRAINERS_CACHE_KEY).is_none());
    }

    #[test]
    fn zero_capacity_still_holds_one_list() {
        let cache = ListCache::new(0, DEFAULT_LIST_TTL);
        cache.put_if_current("a", vec![1], cache.generation());
        cache.put_if_current("b", vec![2], cache.generation());
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b"), Some(vec![2]));
    }
}
