use super::contains_pattern;
use super::store::{op, MySqlStore};
use super::table::TableRecord;
use crate::traits::AlbumRepository;
use async_trait::async_trait;
use shelf_core::domain::Album;
use shelf_core::{OperationContext, ShelfError, ShelfResult};
use tracing::debug;

#[async_trait]
impl AlbumRepository for MySqlStore<Album> {
    async fn search_by_author(&self, author: &str) -> ShelfResult<Vec<Album>> {
        debug!("Searching albums by author: {}", author);

        let sql = format!(
            "SELECT {} FROM albums WHERE author LIKE ? ORDER BY id ASC",
            <Album as TableRecord>::COLUMNS
        );
        sqlx::query_as::<_, Album>(&sql)
            .bind(contains_pattern(author))
            .fetch_all(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("search", Album::TABLE))
    }
}
