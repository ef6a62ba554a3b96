//! Pet service (read-only).

use crate::cache::{CacheKeySet, ListCache};
use shelf_core::domain::Pet;
use shelf_core::{ListResponse, PageRequest, Resource, ShelfError, ShelfResult};
use shelf_repository::PetRepository;
use std::sync::Arc;
use tracing::debug;

/// Cached listing and lookup of pets.
#[derive(Clone)]
pub struct PetService {
    store: Arc<dyn PetRepository>,
    cache: ListCache,
    keys: CacheKeySet,
}

impl PetService {
    #[must_use]
    pub fn new(store: Arc<dyn PetRepository>, cache: ListCache) -> Self {
        Self {
            store,
            cache,
            keys: CacheKeySet::for_resource::<Pet>(),
        }
    }

    pub async fn list(&self, page: PageRequest) -> ShelfResult<ListResponse<Pet>> {
        debug!(limit = page.limit, offset = page.offset, "Listing pets");
        self.cache.load_page(&self.keys, self.store.as_ref(), page).await
    }

    pub async fn get(&self, id: i64) -> ShelfResult<Pet> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::not_found(Pet::NAME, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use shelf_repository::memory::InMemoryStore;
    use std::time::Duration;

    fn pet(id: i64, name: &str) -> Pet {
        Pet {
            id,
            name: name.to_string(),
            owner: "Harold".to_string(),
            species: "cat".to_string(),
            sex: "f".to_string(),
            birth: None,
            death: None,
            database_column: None,
            del: false,
        }
    }

    #[tokio::test]
    async fn test_list_is_cached() {
        let store = Arc::new(InMemoryStore::with_records([pet(1, "Fluffy"), pet(2, "Claws")]));
        let cache = ListCache::new(Arc::new(InMemoryCache::new()), Duration::from_secs(60));
        let service = PetService::new(store.clone(), cache);

        let first = service.list(PageRequest::default()).await.unwrap();
        let second = service.list(PageRequest::default()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total, 2);
        assert_eq!(store.page_calls(), 1);
    }

    #[tokio::test]
    async fn test_get() {
        let store = Arc::new(InMemoryStore::with_records([pet(1, "Fluffy")]));
        let cache = ListCache::new(Arc::new(InMemoryCache::new()), Duration::from_secs(60));
        let service = PetService::new(store, cache);

        assert_eq!(service.get(1).await.unwrap().name, "Fluffy");
        assert!(matches!(service.get(2).await, Err(ShelfError::NotFound { .. })));
    }
}
