use super::store::{op, MySqlStore};
use super::table::TableRecord;
use crate::traits::CommentRepository;
use async_trait::async_trait;
use shelf_core::domain::Comment;
use shelf_core::{OperationContext, PageRequest, ShelfError, ShelfResult};
use tracing::debug;

#[async_trait]
impl CommentRepository for MySqlStore<Comment> {
    async fn count_by_photo(&self, photo_id: i64) -> ShelfResult<i64> {
        debug!("Counting comments of photo {}", photo_id);

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE photo_id = ?")
            .bind(photo_id)
            .fetch_one(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("count", Comment::TABLE))
    }

    async fn find_by_photo(&self, photo_id: i64, page: PageRequest) -> ShelfResult<Vec<Comment>> {
        debug!("Listing comments of photo {}", photo_id);

        let sql = format!(
            "SELECT {} FROM comments WHERE photo_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            Comment::COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(photo_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("list", Comment::TABLE))
    }
}
