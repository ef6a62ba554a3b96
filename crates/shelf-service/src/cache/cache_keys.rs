//! Cache key generators for consistent key naming.
//!
//! Every cached resource owns two namespaces derived from its name:
//! `<resource>:total` for the row count and `<resource>:list` for pages.

use shelf_core::Resource;

/// The cache keys belonging to one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeySet {
    resource: String,
    list_prefix: String,
    total_key: String,
}

impl CacheKeySet {
    /// Derives the key set for a resource name such as `album`.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self {
            list_prefix: format!("{resource}:list"),
            total_key: format!("{resource}:total"),
            resource,
        }
    }

    /// The key set of a [`Resource`] type.
    #[must_use]
    pub fn for_resource<R: Resource>() -> Self {
        Self::new(R::NAME)
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[must_use]
    pub fn list_prefix(&self) -> &str {
        &self.list_prefix
    }

    #[must_use]
    pub fn total_key(&self) -> &str {
        &self.total_key
    }

    /// Key of the page at `(limit, offset)`.
    #[must_use]
    pub fn list_key(&self, limit: u32, offset: u32) -> String {
        list_key(&self.list_prefix, limit, offset)
    }

    /// Pattern matching every page of this resource.
    #[must_use]
    pub fn list_pattern(&self) -> String {
        format!("{}*", self.list_prefix)
    }
}

/// Generate the key of a cached page under `prefix`.
#[must_use]
pub fn list_key(prefix: &str, limit: u32, offset: u32) -> String {
    format!("{prefix}:limit_{limit}:offset_{offset}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::domain::{Album, Photo};
    use std::collections::HashSet;

    #[test]
    fn test_derived_keys() {
        let keys = CacheKeySet::new("album");
        assert_eq!(keys.resource(), "album");
        assert_eq!(keys.list_prefix(), "album:list");
        assert_eq!(keys.total_key(), "album:total");
        assert_eq!(keys.list_key(10, 0), "album:list:limit_10:offset_0");
        assert_eq!(keys.list_pattern(), "album:list*");
    }

    #[test]
    fn test_for_resource() {
        assert_eq!(CacheKeySet::for_resource::<Album>(), CacheKeySet::new("album"));
        assert_eq!(CacheKeySet::for_resource::<Photo>().total_key(), "photo:total");
    }

    #[test]
    fn test_list_key_is_injective() {
        let mut seen = HashSet::new();
        for limit in [1, 10, 11, 100, 110] {
            for offset in [0, 1, 10, 100, 1000] {
                assert!(seen.insert(list_key("album:list", limit, offset)));
            }
        }
        assert_ne!(list_key("p", 1, 10), list_key("p", 11, 0));
    }

    #[test]
    fn test_resources_do_not_collide() {
        let names = ["album", "book", "photo", "song", "team", "pet", "comment"];
        let mut seen = HashSet::new();
        for name in names {
            let keys = CacheKeySet::new(name);
            assert!(seen.insert(keys.total_key().to_string()));
            assert!(seen.insert(keys.list_key(10, 0)));
        }
    }
}
