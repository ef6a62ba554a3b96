//! Cache store trait for abstracted caching operations.

use async_trait::async_trait;
use shelf_core::ShelfResult;
use std::time::Duration;

/// Key-value cache holding JSON strings with a TTL.
///
/// Implementations are best-effort: callers treat every error as a miss.
/// Values are type-erased strings so the trait stays object safe; see
/// [`CacheExt`] for typed access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> ShelfResult<Option<String>>;

    /// Stores a value with a TTL, overwriting any existing value.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ShelfResult<()>;

    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> ShelfResult<bool>;

    /// All keys matching a glob pattern (`*` and `?`).
    async fn scan_keys(&self, pattern: &str) -> ShelfResult<Vec<String>>;

    /// Deletes every key matching a glob pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> ShelfResult<u64> {
        let mut deleted = 0;
        for key in self.scan_keys(pattern).await? {
            if self.delete(&key).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed get/set on top of [`CacheStore`].
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> ShelfResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> ShelfResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheStore + ?Sized> CacheExt for T {}
