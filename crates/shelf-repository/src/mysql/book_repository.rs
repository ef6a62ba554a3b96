use super::contains_pattern;
use super::store::{op, MySqlStore};
use super::table::TableRecord;
use crate::traits::BookRepository;
use async_trait::async_trait;
use shelf_core::domain::{Book, BookSearch};
use shelf_core::{OperationContext, ShelfError, ShelfResult};
use tracing::debug;

#[async_trait]
impl BookRepository for MySqlStore<Book> {
    async fn search(&self, criteria: &BookSearch) -> ShelfResult<Vec<Book>> {
        let filters = criteria.filters();
        debug!("Searching books with {} filter(s)", filters.len());
        if filters.is_empty() {
            return Ok(Vec::new());
        }

        let clause = filters
            .iter()
            .map(|(column, _)| format!("{column} LIKE ?"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let sql = format!(
            "SELECT {} FROM books WHERE {} ORDER BY id ASC",
            Book::COLUMNS,
            clause
        );

        let mut query = sqlx::query_as::<_, Book>(&sql);
        for (_, needle) in &filters {
            query = query.bind(contains_pattern(needle));
        }
        query
            .fetch_all(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("search", Book::TABLE))
    }
}
