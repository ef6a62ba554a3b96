//! Cache-aside storage of list pages and row counts.
//!
//! Reads consult the cache first and fall back to the store, populating the
//! cache afterwards. Writes to a collection must call
//! [`ListCache::invalidate`] once the store has acknowledged them. Every
//! cache failure degrades to a miss; only store errors reach the caller.

use super::{CacheKeySet, CacheStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shelf_core::{ListResponse, PageRequest, ShelfResult};
use shelf_repository::ListStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// List/total cache shared by every resource service.
#[derive(Clone)]
pub struct ListCache {
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl ListCache {
    /// Creates a list cache over `cache` with a default entry TTL.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Cached row count, or `None` on a miss.
    pub async fn get_total(&self, keys: &CacheKeySet) -> Option<i64> {
        let raw = match self.cache.get_raw(keys.total_key()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = keys.total_key(), "total cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = keys.total_key(), error = %e, "total cache read failed");
                return None;
            }
        };

        match raw.trim().parse::<i64>() {
            Ok(total) => Some(total),
            Err(_) => {
                warn!(key = keys.total_key(), value = %raw, "cached total is not a number");
                None
            }
        }
    }

    /// Stores the row count. Failures are logged and dropped.
    pub async fn set_total(&self, keys: &CacheKeySet, total: i64, ttl: Duration) {
        if let Err(e) = self
            .cache
            .set_raw(keys.total_key(), &total.to_string(), ttl)
            .await
        {
            warn!(key = keys.total_key(), error = %e, "total cache write failed");
        }
    }

    /// Cached page at `(limit, offset)`, or `None` on a miss.
    pub async fn get_list<E: DeserializeOwned>(
        &self,
        keys: &CacheKeySet,
        page: PageRequest,
    ) -> Option<Vec<E>> {
        let key = keys.list_key(page.limit, page.offset);
        let raw = match self.cache.get_raw(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "list cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "list cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(key = %key, error = %e, "cached list could not be decoded");
                None
            }
        }
    }

    /// Stores a page. Failures are logged and dropped.
    pub async fn set_list<E: Serialize>(
        &self,
        keys: &CacheKeySet,
        page: PageRequest,
        records: &[E],
        ttl: Duration,
    ) {
        let key = keys.list_key(page.limit, page.offset);
        let json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "list could not be encoded for caching");
                return;
            }
        };
        if let Err(e) = self.cache.set_raw(&key, &json, ttl).await {
            warn!(key = %key, error = %e, "list cache write failed");
        }
    }

    /// Drops the total and every cached page of a resource.
    ///
    /// Both deletes are attempted. Failures are logged and not retried, so
    /// stale entries may survive until their TTL.
    pub async fn invalidate(&self, keys: &CacheKeySet) {
        if let Err(e) = self.cache.delete(keys.total_key()).await {
            warn!(resource = keys.resource(), error = %e, "total invalidation failed");
        }
        match self.cache.delete_pattern(&keys.list_pattern()).await {
            Ok(deleted) => debug!(resource = keys.resource(), deleted, "list cache invalidated"),
            Err(e) => warn!(resource = keys.resource(), error = %e, "list invalidation failed"),
        }
    }

    /// Full cache-aside read of one page and the collection total.
    pub async fn load_page<E, S>(
        &self,
        keys: &CacheKeySet,
        store: &S,
        page: PageRequest,
    ) -> ShelfResult<ListResponse<E>>
    where
        E: Serialize + DeserializeOwned + Send,
        S: ListStore<E> + ?Sized,
    {
        let total = match self.get_total(keys).await {
            Some(total) => total,
            None => {
                let total = store.count().await?;
                self.set_total(keys, total, self.ttl).await;
                total
            }
        };

        let list = match self.get_list(keys, page).await {
            Some(list) => list,
            None => {
                let list = store.find_page(page).await?;
                self.set_list(keys, page, &list, self.ttl).await;
                list
            }
        };

        Ok(ListResponse::new(list, total))
    }
}

impl std::fmt::Debug for ListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListCache")
            .field("enabled", &self.cache.is_enabled())
            .field("ttl", &self.ttl)
            .finish()
    }
}
