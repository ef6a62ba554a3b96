//! Photo service.

use crate::{AlbumService, ResourceService};
use shelf_core::domain::{Photo, PhotoForm};
use shelf_core::{ListResponse, PageRequest, ShelfResult, ValidateExt};
use shelf_repository::PhotoRepository;
use tracing::debug;

/// CRUD over photos. Writes require the owning album to exist.
#[derive(Clone)]
pub struct PhotoService {
    photos: ResourceService<Photo, PhotoForm, dyn PhotoRepository>,
    albums: AlbumService,
}

impl PhotoService {
    #[must_use]
    pub fn new(
        photos: ResourceService<Photo, PhotoForm, dyn PhotoRepository>,
        albums: AlbumService,
    ) -> Self {
        Self { photos, albums }
    }

    pub async fn list(&self, page: PageRequest) -> ShelfResult<ListResponse<Photo>> {
        self.photos.list(page).await
    }

    pub async fn get(&self, id: i64) -> ShelfResult<Photo> {
        self.photos.get(id).await
    }

    pub async fn ensure_exists(&self, id: i64) -> ShelfResult<()> {
        self.photos.ensure_exists(id).await
    }

    pub async fn create(&self, form: &PhotoForm) -> ShelfResult<Photo> {
        form.validate_request()?;
        self.albums.ensure_exists(form.album_id).await?;
        self.photos.create(form).await
    }

    pub async fn update(&self, id: i64, form: &PhotoForm) -> ShelfResult<Photo> {
        form.validate_request()?;
        self.albums.ensure_exists(form.album_id).await?;
        self.photos.update(id, form).await
    }

    pub async fn delete(&self, id: i64) -> ShelfResult<()> {
        self.photos.delete(id).await
    }

    /// Photos of one album, uncached.
    pub async fn list_by_album(
        &self,
        album_id: i64,
        page: PageRequest,
    ) -> ShelfResult<ListResponse<Photo>> {
        self.albums.ensure_exists(album_id).await?;
        debug!(album_id, "Listing photos of album");

        let store = self.photos.store();
        let total = store.count_by_album(album_id).await?;
        let list = store.find_by_album(album_id, page).await?;
        Ok(ListResponse::new(list, total))
    }
}
