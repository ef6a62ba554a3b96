//! Redis-based cache implementation.

use super::CacheStore;
use async_trait::async_trait;
use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Config, Pool, Runtime};
use shelf_config::RedisConfig;
use shelf_core::{ShelfError, ShelfResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Redis-based cache service.
#[derive(Clone)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Builds the connection pool from configuration.
    ///
    /// No connection is opened here; the pool connects lazily.
    pub fn connect(config: &RedisConfig) -> ShelfResult<Self> {
        info!("Creating Redis connection pool...");

        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| ShelfError::Configuration(format!("Invalid Redis config: {e}")))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| ShelfError::Cache(format!("Failed to create Redis pool: {e}")))?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Create a no-op cache service: reads miss and writes are dropped.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Round-trips a `PING`.
    pub async fn ping(&self) -> ShelfResult<()> {
        let mut conn = self.get_conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| ShelfError::Cache(format!("Redis ping failed: {e}")))?;
        Ok(())
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ShelfResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| ShelfError::Cache(format!("Failed to get Redis connection: {e}"))),
            None => Err(ShelfError::Cache("Cache is disabled".to_string())),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[async_trait]
impl CacheStore for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> ShelfResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| ShelfError::Cache(format!("Failed to get key '{key}': {e}")))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ShelfResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| ShelfError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ShelfResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| ShelfError::Cache(format!("Failed to delete key '{key}': {e}")))?;

        Ok(deleted > 0)
    }

    async fn scan_keys(&self, pattern: &str) -> ShelfResult<Vec<String>> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_conn().await?;
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| ShelfError::Cache(format!("Failed to scan '{pattern}': {e}")))?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once.
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn delete_pattern(&self, pattern: &str) -> ShelfResult<u64> {
        let keys = self.scan_keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let deleted: u64 = conn
            .del(&keys)
            .await
            .map_err(|e| ShelfError::Cache(format!("Failed to delete keys: {e}")))?;

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_is_a_no_op() {
        let cache = RedisCacheService::disabled();
        cache.set_raw("album:total", "42", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get_raw("album:total").await.unwrap(), None);
        assert!(!cache.delete("album:total").await.unwrap());
        assert!(cache.scan_keys("album:list*").await.unwrap().is_empty());
        assert_eq!(cache.delete_pattern("album:list*").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ping_fails_when_disabled() {
        let cache = RedisCacheService::disabled();
        assert!(matches!(cache.ping().await, Err(ShelfError::Cache(_))));
    }

    #[tokio::test]
    async fn test_connect_builds_lazily() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1/0".to_string(),
            pool_size: 2,
        };
        let cache = RedisCacheService::connect(&config).unwrap();
        assert!(cache.is_enabled());
    }
}
