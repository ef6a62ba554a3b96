//! Fixtures shared by the unit tests of this crate.

use crate::cache::{InMemoryCache, ListCache};
use crate::{AlbumService, PhotoService, ResourceService};
use shelf_core::domain::{Album, Photo};
use shelf_repository::memory::InMemoryStore;
use shelf_repository::{AlbumRepository, PhotoRepository};
use std::sync::Arc;
use std::time::Duration;

pub fn list_cache() -> ListCache {
    ListCache::new(Arc::new(InMemoryCache::new()), Duration::from_secs(60))
}

pub fn album(id: i64) -> Album {
    Album {
        id,
        name: format!("Album {id}"),
        author: "Various Artists".to_string(),
        description: String::new(),
        liked: 0,
        created_at: None,
        updated_at: None,
    }
}

pub fn photo(id: i64, album_id: i64) -> Photo {
    Photo {
        id,
        title: format!("Photo {id}"),
        url: format!("https://img.example.com/{id}.jpg"),
        description: String::new(),
        album_id,
        created_at: None,
        updated_at: None,
    }
}

/// Album service over the given album ids.
pub fn album_service(ids: &[i64]) -> AlbumService {
    let store: Arc<dyn AlbumRepository> =
        Arc::new(InMemoryStore::with_records(ids.iter().copied().map(album)));
    AlbumService::new(store, list_cache())
}

/// Photo service over albums 1 and 2, with the given photos.
pub fn photo_service(photos: Vec<Photo>) -> PhotoService {
    let store: Arc<dyn PhotoRepository> = Arc::new(InMemoryStore::with_records(photos));
    PhotoService::new(ResourceService::new(store, list_cache()), album_service(&[1, 2]))
}
