use super::store::{op, MySqlStore};
use super::table::TableRecord;
use crate::traits::PhotoRepository;
use async_trait::async_trait;
use shelf_core::domain::Photo;
use shelf_core::{OperationContext, PageRequest, ShelfError, ShelfResult};
use tracing::debug;

#[async_trait]
impl PhotoRepository for MySqlStore<Photo> {
    async fn count_by_album(&self, album_id: i64) -> ShelfResult<i64> {
        debug!("Counting photos of album {}", album_id);

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photos WHERE album_id = ?")
            .bind(album_id)
            .fetch_one(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("count", Photo::TABLE))
    }

    async fn find_by_album(&self, album_id: i64, page: PageRequest) -> ShelfResult<Vec<Photo>> {
        debug!("Listing photos of album {}", album_id);

        let sql = format!(
            "SELECT {} FROM photos WHERE album_id = ? ORDER BY id ASC LIMIT ? OFFSET ?",
            Photo::COLUMNS
        );
        sqlx::query_as::<_, Photo>(&sql)
            .bind(album_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("list", Photo::TABLE))
    }
}
