//! Caching infrastructure for the service layer.
//!
//! A [`CacheStore`] abstraction with Redis and in-memory implementations,
//! per-resource key sets, and the cache-aside [`ListCache`] used by every
//! paginated "list all" read.

mod cache_interface;
pub mod cache_keys;
mod list_cache;
mod memory_cache;
mod redis_cache;

#[cfg(test)]
pub use cache_interface::MockCacheStore;
pub use cache_interface::{CacheExt, CacheStore};
pub use cache_keys::CacheKeySet;
pub use list_cache::ListCache;
pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCacheService;
