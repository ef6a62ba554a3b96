//! Song service.

use crate::{AlbumService, ResourceService};
use shelf_core::domain::{Song, SongForm};
use shelf_core::{ListResponse, PageRequest, ShelfResult, ValidateExt};
use shelf_repository::SongRepository;
use tracing::debug;

/// CRUD over songs. Writes require the owning album to exist.
#[derive(Clone)]
pub struct SongService {
    songs: ResourceService<Song, SongForm, dyn SongRepository>,
    albums: AlbumService,
}

impl SongService {
    #[must_use]
    pub fn new(
        songs: ResourceService<Song, SongForm, dyn SongRepository>,
        albums: AlbumService,
    ) -> Self {
        Self { songs, albums }
    }

    pub async fn list(&self, page: PageRequest) -> ShelfResult<ListResponse<Song>> {
        self.songs.list(page).await
    }

    pub async fn get(&self, id: i64) -> ShelfResult<Song> {
        self.songs.get(id).await
    }

    pub async fn create(&self, form: &SongForm) -> ShelfResult<Song> {
        form.validate_request()?;
        self.albums.ensure_exists(form.album_id).await?;
        self.songs.create(form).await
    }

    pub async fn update(&self, id: i64, form: &SongForm) -> ShelfResult<Song> {
        form.validate_request()?;
        self.albums.ensure_exists(form.album_id).await?;
        self.songs.update(id, form).await
    }

    pub async fn delete(&self, id: i64) -> ShelfResult<()> {
        self.songs.delete(id).await
    }

    /// Songs of one album in track order, uncached.
    pub async fn list_by_album(
        &self,
        album_id: i64,
        page: PageRequest,
    ) -> ShelfResult<ListResponse<Song>> {
        self.albums.ensure_exists(album_id).await?;
        debug!(album_id, "Listing songs of album");

        let store = self.songs.store();
        let total = store.count_by_album(album_id).await?;
        let list = store.find_by_album(album_id, page).await?;
        Ok(ListResponse::new(list, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{album_service, list_cache};
    use shelf_core::ShelfError;
    use shelf_repository::memory::InMemoryStore;
    use std::sync::Arc;

    fn form(album_id: i64, title: &str, track_number: i32) -> SongForm {
        SongForm {
            title: title.to_string(),
            duration: 180,
            track_number,
            album_id,
        }
    }

    fn service() -> SongService {
        let store: Arc<dyn SongRepository> = Arc::new(InMemoryStore::<Song>::new());
        SongService::new(ResourceService::new(store, list_cache()), album_service(&[1, 2]))
    }

    #[tokio::test]
    async fn test_create_requires_album() {
        let songs = service();
        let err = songs.create(&form(9, "So What", 1)).await.unwrap_err();
        assert!(matches!(err, ShelfError::NotFound { resource_type: "album", .. }));
        assert_eq!(songs.list(PageRequest::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_update_requires_album() {
        let songs = service();
        let song = songs.create(&form(1, "So What", 1)).await.unwrap();
        let err = songs.update(song.id, &form(7, "So What", 1)).await.unwrap_err();
        assert!(matches!(err, ShelfError::NotFound { resource_type: "album", .. }));
    }

    #[tokio::test]
    async fn test_list_by_album_in_track_order() {
        let songs = service();
        songs.create(&form(1, "Blue in Green", 3)).await.unwrap();
        songs.create(&form(1, "So What", 1)).await.unwrap();
        songs.create(&form(2, "Elsewhere", 1)).await.unwrap();
        songs.create(&form(1, "Freddie Freeloader", 2)).await.unwrap();

        let page = songs.list_by_album(1, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 3);
        let tracks: Vec<i32> = page.list.iter().map(|s| s.track_number).collect();
        assert_eq!(tracks, vec![1, 2, 3]);

        assert!(matches!(
            songs.list_by_album(5, PageRequest::default()).await,
            Err(ShelfError::NotFound { .. })
        ));
    }
}
