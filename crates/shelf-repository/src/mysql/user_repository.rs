//! MySQL user repository implementation.

use crate::traits::UserRepository;
use crate::DatabasePool;
use async_trait::async_trait;
use shelf_core::domain::User;
use shelf_core::{OperationContext, ShelfError, ShelfResult};
use std::sync::Arc;
use tracing::debug;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> ShelfResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, created_at, updated_at
            FROM users
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> ShelfResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, created_at, updated_at
            FROM users
            WHERE username = ? AND deleted_at IS NULL
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(user)
    }

    async fn exists_by_username(&self, username: &str) -> ShelfResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, username: &str, password_hash: &str) -> ShelfResult<User> {
        debug!("Creating user: {}", username);

        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(self.pool.inner())
            .await
            .map_err(ShelfError::from)
            .during("create_user")?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| ShelfError::internal("insert id out of range"))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::internal(format!("user {id} vanished after insert")))
    }
}
