//! Table-driven MySQL store shared by most resources.

use super::table::{FormTable, TableForm, TableRecord};
use crate::traits::{CrudStore, FileRepository, ListStore, PetRepository, TeamRepository};
use crate::DatabasePool;
use async_trait::async_trait;
use shelf_core::domain::{FileRecord, Pet, Team};
use shelf_core::{OperationContext, PageRequest, ShelfError, ShelfResult};
use sqlx::mysql::MySqlPool;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// MySQL store for one entity type.
pub struct MySqlStore<E> {
    pool: Arc<DatabasePool>,
    _record: PhantomData<fn() -> E>,
}

impl<E> MySqlStore<E> {
    /// Creates a store on the shared pool.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    pub(crate) fn pool(&self) -> &MySqlPool {
        self.pool.inner()
    }
}

impl<E> Clone for MySqlStore<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.pool))
    }
}

pub(crate) fn op(verb: &str, table: &str) -> String {
    format!("{verb}_{table}")
}

impl<E: TableRecord> MySqlStore<E> {
    pub(crate) async fn fetch_by_id(&self, id: i64) -> ShelfResult<Option<E>> {
        debug!("Finding {} row by id: {}", E::TABLE, id);

        let sql = format!("SELECT {} FROM {} WHERE id = ?", E::COLUMNS, E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("find", E::TABLE))
    }
}

#[async_trait]
impl<E: TableRecord> ListStore<E> for MySqlStore<E> {
    async fn count(&self) -> ShelfResult<i64> {
        debug!("Counting {}", E::TABLE);

        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("count", E::TABLE))
    }

    async fn find_page(&self, page: PageRequest) -> ShelfResult<Vec<E>> {
        debug!(
            "Listing {} with limit {} offset {}",
            E::TABLE,
            page.limit,
            page.offset
        );

        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} LIMIT ? OFFSET ?",
            E::COLUMNS,
            E::TABLE,
            E::ORDER_BY
        );
        sqlx::query_as::<_, E>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("list", E::TABLE))
    }
}

#[async_trait]
impl<E: FormTable> CrudStore<E, E::Form> for MySqlStore<E> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<E>> {
        self.fetch_by_id(id).await
    }

    async fn insert(&self, form: &E::Form) -> ShelfResult<E> {
        debug!("Inserting into {}", E::TABLE);

        let columns = <E::Form as TableForm>::COLUMNS;
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );
        let result = form
            .bind_values(sqlx::query(&sql))
            .execute(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("create", E::TABLE))?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| ShelfError::internal("insert id out of range"))?;
        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::internal(format!("{} row {} vanished after insert", E::TABLE, id)))
    }

    async fn update(&self, id: i64, form: &E::Form) -> ShelfResult<Option<E>> {
        debug!("Updating {} row {}", E::TABLE, id);

        let assignments = <E::Form as TableForm>::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", E::TABLE, assignments);
        form.bind_values(sqlx::query(&sql))
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("update", E::TABLE))?;

        // rows_affected is 0 for unchanged rows too, so re-read to tell
        // "missing" apart from "no-op".
        self.fetch_by_id(id).await
    }

    async fn delete(&self, id: i64) -> ShelfResult<bool> {
        debug!("Deleting {} row {}", E::TABLE, id);

        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(ShelfError::from)
            .during(&op("delete", E::TABLE))?;

        Ok(result.rows_affected() > 0)
    }
}

impl TeamRepository for MySqlStore<Team> {}

impl FileRepository for MySqlStore<FileRecord> {}

#[async_trait]
impl PetRepository for MySqlStore<Pet> {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<Pet>> {
        self.fetch_by_id(id).await
    }
}
