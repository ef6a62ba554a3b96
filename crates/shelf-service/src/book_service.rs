//! Book service.

use crate::ResourceService;
use shelf_core::domain::{Book, BookForm, BookSearch};
use shelf_core::{ShelfError, ShelfResult};
use shelf_repository::BookRepository;
use tracing::debug;

/// CRUD and multi-field search over books.
pub type BookService = ResourceService<Book, BookForm, dyn BookRepository>;

impl ResourceService<Book, BookForm, dyn BookRepository> {
    /// Books matching any of the given filters. Results are not cached.
    pub async fn search(&self, query: &BookSearch) -> ShelfResult<Vec<Book>> {
        if query.is_empty() {
            return Err(ShelfError::validation(
                "at least one of author, title or isbn is required",
            ));
        }

        debug!(?query, "Searching books");
        self.store().search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryCache, ListCache};
    use shelf_repository::memory::InMemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn book(id: i64, isbn: &str, title: &str, author: &str) -> Book {
        Book {
            id,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            stock: 1,
            publisher: String::new(),
            publish_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn service() -> BookService {
        let store: Arc<dyn BookRepository> = Arc::new(InMemoryStore::with_records([
            book(1, "9780262033848", "Introduction to Algorithms", "Cormen"),
            book(2, "9780201633610", "Design Patterns", "Gamma"),
            book(3, "9781593278281", "The Rust Programming Language", "Klabnik"),
        ]));
        let cache = ListCache::new(Arc::new(InMemoryCache::new()), Duration::from_secs(60));
        BookService::new(store, cache)
    }

    #[tokio::test]
    async fn test_search_ors_filters() {
        let query = BookSearch {
            author: Some("gamma".to_string()),
            title: Some("Rust".to_string()),
            isbn: None,
        };
        let found = service().search(&query).await.unwrap();
        assert_eq!(found.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_search_requires_a_filter() {
        assert!(matches!(
            service().search(&BookSearch::default()).await,
            Err(ShelfError::Validation(_))
        ));
    }
}
