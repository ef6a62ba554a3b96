//! Generic CRUD service over a cached resource collection.

use crate::cache::{CacheKeySet, ListCache};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shelf_core::{ListResponse, PageRequest, Resource, ShelfError, ShelfResult, ValidateExt};
use shelf_repository::CrudStore;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// CRUD for one resource type with a cache-aside paginated list.
///
/// `E` is the entity, `F` its validated write form and `S` the store,
/// usually a `dyn` repository trait. Successful writes invalidate the
/// resource's list cache before returning.
pub struct ResourceService<E, F, S: ?Sized> {
    store: Arc<S>,
    cache: ListCache,
    keys: CacheKeySet,
    _types: PhantomData<fn() -> (E, F)>,
}

impl<E, F, S> ResourceService<E, F, S>
where
    E: Resource + Serialize + DeserializeOwned + Send + Sync + 'static,
    F: Validate + Send + Sync,
    S: CrudStore<E, F> + ?Sized,
{
    /// Creates a service keyed by `E::NAME`.
    #[must_use]
    pub fn new(store: Arc<S>, cache: ListCache) -> Self {
        Self {
            store,
            cache,
            keys: CacheKeySet::for_resource::<E>(),
            _types: PhantomData,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[must_use]
    pub fn keys(&self) -> &CacheKeySet {
        &self.keys
    }

    /// One page of the whole collection plus its total.
    pub async fn list(&self, page: PageRequest) -> ShelfResult<ListResponse<E>> {
        debug!(resource = E::NAME, limit = page.limit, offset = page.offset, "Listing");
        self.cache.load_page(&self.keys, self.store.as_ref(), page).await
    }

    pub async fn get(&self, id: i64) -> ShelfResult<E> {
        debug!(resource = E::NAME, id, "Getting");
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::not_found(E::NAME, id))
    }

    /// Fails with `NotFound` unless a record with `id` exists.
    pub async fn ensure_exists(&self, id: i64) -> ShelfResult<()> {
        self.get(id).await.map(|_| ())
    }

    pub async fn create(&self, form: &F) -> ShelfResult<E> {
        form.validate_request()?;

        let created = self.store.insert(form).await?;
        self.cache.invalidate(&self.keys).await;

        info!(resource = E::NAME, "Created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, form: &F) -> ShelfResult<E> {
        form.validate_request()?;

        let updated = self
            .store
            .update(id, form)
            .await?
            .ok_or_else(|| ShelfError::not_found(E::NAME, id))?;
        self.cache.invalidate(&self.keys).await;

        info!(resource = E::NAME, id, "Updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ShelfResult<()> {
        if !self.store.delete(id).await? {
            return Err(ShelfError::not_found(E::NAME, id));
        }
        self.cache.invalidate(&self.keys).await;

        info!(resource = E::NAME, id, "Deleted");
        Ok(())
    }
}

impl<E, F, S: ?Sized> Clone for ResourceService<E, F, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: self.cache.clone(),
            keys: self.keys.clone(),
            _types: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use shelf_core::domain::{Team, TeamForm};
    use shelf_repository::memory::InMemoryStore;
    use std::time::Duration;

    type Teams = ResourceService<Team, TeamForm, InMemoryStore<Team>>;

    fn form(name: &str) -> TeamForm {
        TeamForm {
            name: name.to_string(),
            city: "Boston".to_string(),
            champions: 17,
            divide: "Atlantic".to_string(),
            logo: String::new(),
            part: "East".to_string(),
        }
    }

    fn service() -> (Teams, Arc<InMemoryStore<Team>>, Arc<InMemoryCache>) {
        let store = Arc::new(InMemoryStore::new());
        let memory = Arc::new(InMemoryCache::new());
        let cache = ListCache::new(memory.clone(), Duration::from_secs(60));
        (Teams::new(store.clone(), cache), store, memory)
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let (teams, store, _) = service();
        let created = teams.create(&form("Celtics")).await.unwrap();
        assert_eq!(teams.get(created.id).await.unwrap().name, "Celtics");

        let page = teams.list(PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].id, created.id);

        teams.list(PageRequest::default()).await.unwrap();
        assert_eq!(store.count_calls(), 1);
    }

    #[tokio::test]
    async fn test_writes_invalidate_the_list_cache() {
        let (teams, store, memory) = service();
        let created = teams.create(&form("Celtics")).await.unwrap();
        teams.list(PageRequest::default()).await.unwrap();
        assert!(memory.contains("team:total"));

        teams.update(created.id, &form("Lakers")).await.unwrap();
        assert!(memory.is_empty());

        let page = teams.list(PageRequest::default()).await.unwrap();
        assert_eq!(page.list[0].name, "Lakers");
        assert_eq!(store.count_calls(), 2);

        teams.delete(created.id).await.unwrap();
        assert!(memory.is_empty());
        assert_eq!(teams.list(PageRequest::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_before_the_store() {
        let (teams, store, _) = service();
        let err = teams.create(&form("X")).await.unwrap_err();
        assert!(matches!(err, ShelfError::InvalidFields(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (teams, _, _) = service();
        assert!(matches!(teams.get(9).await, Err(ShelfError::NotFound { .. })));
        assert!(matches!(
            teams.update(9, &form("Celtics")).await,
            Err(ShelfError::NotFound { .. })
        ));
        assert!(matches!(teams.delete(9).await, Err(ShelfError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_writes_ignore_an_unreachable_cache() {
        let (teams, store, memory) = service();
        memory.set_available(false);

        let created = teams.create(&form("Celtics")).await.unwrap();
        let updated = teams.update(created.id, &form("Lakers")).await.unwrap();
        assert_eq!(updated.name, "Lakers");
        teams.delete(created.id).await.unwrap();
        assert!(store.is_empty());

        memory.set_available(true);
        assert_eq!(teams.list(PageRequest::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_the_cache() {
        let (teams, store, memory) = service();
        teams.create(&form("Celtics")).await.unwrap();
        teams.list(PageRequest::default()).await.unwrap();

        store.set_failing(true);
        assert!(teams.create(&form("Lakers")).await.is_err());
        assert!(memory.contains("team:total"));
    }
}
