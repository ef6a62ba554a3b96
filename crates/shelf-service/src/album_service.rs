//! Album service.

use crate::ResourceService;
use shelf_core::domain::{Album, AlbumForm, AlbumSearch};
use shelf_core::{ShelfError, ShelfResult};
use shelf_repository::AlbumRepository;
use tracing::debug;

/// CRUD and author search over albums.
pub type AlbumService = ResourceService<Album, AlbumForm, dyn AlbumRepository>;

impl ResourceService<Album, AlbumForm, dyn AlbumRepository> {
    /// Albums whose author contains the query. Results are not cached.
    pub async fn search(&self, query: &AlbumSearch) -> ShelfResult<Vec<Album>> {
        let author = query
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ShelfError::validation("author is required"))?;

        debug!(author, "Searching albums");
        self.store().search_by_author(author).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryCache, ListCache};
    use shelf_repository::memory::InMemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn album(id: i64, author: &str) -> Album {
        Album {
            id,
            name: format!("Album {id}"),
            author: author.to_string(),
            description: String::new(),
            liked: 0,
            created_at: None,
            updated_at: None,
        }
    }

    fn service() -> AlbumService {
        let store: Arc<dyn AlbumRepository> = Arc::new(InMemoryStore::with_records([
            album(1, "Miles Davis"),
            album(2, "John Coltrane"),
            album(3, "Miles Okazaki"),
        ]));
        let cache = ListCache::new(Arc::new(InMemoryCache::new()), Duration::from_secs(60));
        AlbumService::new(store, cache)
    }

    #[tokio::test]
    async fn test_search_by_author() {
        let found = service()
            .search(&AlbumSearch {
                author: Some("miles".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_search_requires_author() {
        let service = service();
        assert!(matches!(
            service.search(&AlbumSearch::default()).await,
            Err(ShelfError::Validation(_))
        ));
        assert!(matches!(
            service
                .search(&AlbumSearch {
                    author: Some("  ".to_string())
                })
                .await,
            Err(ShelfError::Validation(_))
        ));
    }
}
