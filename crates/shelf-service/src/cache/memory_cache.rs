//! Process-local cache implementation.

use super::CacheStore;
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use shelf_core::{ShelfError, ShelfResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Default entry bound for [`InMemoryCache::new`].
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was last written with.
struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// A bounded, TTL-aware moka cache.
///
/// Used for single-instance deployments and as the cache double in tests.
/// Expired entries are evicted by moka's housekeeping, and the number of
/// entries never grows past the configured capacity.
/// [`InMemoryCache::set_available`] simulates an unreachable cache: while
/// unavailable every operation fails with `ShelfError::Cache`.
#[derive(Debug)]
pub struct InMemoryCache {
    entries: Cache<String, Entry>,
    available: AtomicBool,
}

impl InMemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// A cache holding at most `max_entries` entries.
    #[must_use]
    pub fn with_capacity(max_entries: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_entries)
                .expire_after(EntryTtl)
                .build(),
            available: AtomicBool::new(true),
        }
    }

    /// Toggles the simulated outage.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether a live (unexpired) entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> ShelfResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ShelfError::Cache("in-memory cache unavailable".to_string()))
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> ShelfResult<Option<String>> {
        self.check()?;
        Ok(self.entries.get(key).await.map(|entry| entry.value))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ShelfResult<()> {
        self.check()?;
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> ShelfResult<bool> {
        self.check()?;
        Ok(self.entries.remove(key).await.is_some())
    }

    async fn scan_keys(&self, pattern: &str) -> ShelfResult<Vec<String>> {
        self.check()?;
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, _)| glob_match(pattern, key))
            .map(|(key, _)| key.as_ref().clone())
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

/// Redis-style glob matching supporting `*` and `?`.
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
