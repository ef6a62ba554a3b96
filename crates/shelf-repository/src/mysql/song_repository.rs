use super::store::{op, MySqlStore};
use super::table::TableRecord;
use crate::traits::SongRepository;
use async_trait::async_trait;
use shelf_core::domain::Song;
use shelf_core::{OperationContext, PageRequest, ShelfError, ShelfResult};
use tracing::debug;

#[async_trait]
impl SongRepository for MySqlStore<Song> {
    async fn count_by_album(&self, album_id: i64) -> ShelfResult<i64> {
        debug!("Counting songs of album {}", album_id);

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM songs WHERE album_id = ?")
            .bind(album_id)
            .fetch_one(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("count", Song::TABLE))
    }

    async fn find_by_album(&self, album_id: i64, page: PageRequest) -> ShelfResult<Vec<Song>> {
        debug!("Listing songs of album {}", album_id);

        let sql = format!(
            "SELECT {} FROM songs WHERE album_id = ? ORDER BY track_number ASC, id ASC LIMIT ? OFFSET ?",
            Song::COLUMNS
        );
        sqlx::query_as::<_, Song>(&sql)
            .bind(album_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("list", Song::TABLE))
    }
}
