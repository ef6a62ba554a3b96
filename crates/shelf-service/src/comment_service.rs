//! Comment service.

use crate::{PhotoService, ResourceService};
use shelf_core::domain::{Comment, CommentForm};
use shelf_core::{ListResponse, PageRequest, ShelfResult, ValidateExt};
use shelf_repository::CommentRepository;
use tracing::debug;

/// CRUD over photo comments.
///
/// The flat `list` is cached under the `comment` namespace; per-photo
/// listings go straight to the store.
#[derive(Clone)]
pub struct CommentService {
    comments: ResourceService<Comment, CommentForm, dyn CommentRepository>,
    photos: PhotoService,
}

impl CommentService {
    #[must_use]
    pub fn new(
        comments: ResourceService<Comment, CommentForm, dyn CommentRepository>,
        photos: PhotoService,
    ) -> Self {
        Self { comments, photos }
    }

    pub async fn list(&self, page: PageRequest) -> ShelfResult<ListResponse<Comment>> {
        self.comments.list(page).await
    }

    pub async fn get(&self, id: i64) -> ShelfResult<Comment> {
        self.comments.get(id).await
    }

    pub async fn create(&self, form: &CommentForm) -> ShelfResult<Comment> {
        form.validate_request()?;
        self.photos.ensure_exists(form.photo_id).await?;
        self.comments.create(form).await
    }

    pub async fn update(&self, id: i64, form: &CommentForm) -> ShelfResult<Comment> {
        form.validate_request()?;
        self.photos.ensure_exists(form.photo_id).await?;
        self.comments.update(id, form).await
    }

    pub async fn delete(&self, id: i64) -> ShelfResult<()> {
        self.comments.delete(id).await
    }

    /// Comments on one photo, newest first.
    pub async fn list_by_photo(
        &self,
        photo_id: i64,
        page: PageRequest,
    ) -> ShelfResult<ListResponse<Comment>> {
        self.photos.ensure_exists(photo_id).await?;
        debug!(photo_id, "Listing comments of photo");

        let store = self.comments.store();
        let total = store.count_by_photo(photo_id).await?;
        let list = store.find_by_photo(photo_id, page).await?;
        Ok(ListResponse::new(list, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{list_cache, photo, photo_service};
    use shelf_core::ShelfError;
    use shelf_repository::memory::InMemoryStore;
    use std::sync::Arc;

    fn form(photo_id: i64, content: &str) -> CommentForm {
        CommentForm {
            photo_id,
            content: content.to_string(),
            author: "guest".to_string(),
        }
    }

    fn service() -> CommentService {
        let store: Arc<dyn CommentRepository> = Arc::new(InMemoryStore::<Comment>::new());
        CommentService::new(
            ResourceService::new(store, list_cache()),
            photo_service(vec![photo(1, 1), photo(2, 1)]),
        )
    }

    #[tokio::test]
    async fn test_create_requires_photo() {
        let comments = service();
        assert!(comments.create(&form(1, "nice")).await.is_ok());
        assert!(matches!(
            comments.create(&form(42, "nice")).await,
            Err(ShelfError::NotFound { resource_type: "photo", .. })
        ));
    }

    #[tokio::test]
    async fn test_list_by_photo() {
        let comments = service();
        comments.create(&form(1, "first")).await.unwrap();
        comments.create(&form(2, "elsewhere")).await.unwrap();
        comments.create(&form(1, "second")).await.unwrap();

        let page = comments.list_by_photo(1, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(page.list.iter().all(|c| c.photo_id == 1));

        let all = comments.list(PageRequest::default()).await.unwrap();
        assert_eq!(all.total, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_comment() {
        let comments = service();
        assert!(matches!(comments.delete(5).await, Err(ShelfError::NotFound { .. })));
    }
}
