//! Postgres-backed account and post stores

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::{AccountStore, PostStore, StoreError};
use crate::models::{Account, Post};

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(
        &self,
        handle: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (handle, email, pw_hash)
            VALUES ($1, $2, $3)
            RETURNING id, handle, email, pw_hash
            "#,
        )
        .bind(handle)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(account)
    }

    async fn by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, handle, email, pw_hash FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn by_handle(&self, handle: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, handle, email, pw_hash FROM accounts WHERE handle = $1",
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, handle, email, pw_hash FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, content: &str, author: i64) -> Result<Post, StoreError> {
        let now = Utc::now().timestamp();

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (content, author, post_time)
            VALUES ($1, $2, $3)
            RETURNING id, content, author, post_time
            "#,
        )
        .bind(content)
        .bind(author)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(post)
    }

    async fn by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            "SELECT id, content, author, post_time FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn by_author(&self, author: i64) -> Result<Vec<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, content, author, post_time
            FROM posts
            WHERE author = $1
            ORDER BY post_time DESC
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Unavailable(err.to_string()),
    }
}
