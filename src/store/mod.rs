//! Keyed persistence for accounts and posts.
//!
//! The traits here are the seam between the service layer and Postgres.
//! Uniqueness of handle and email is enforced by the storage layer
//! itself (UNIQUE constraints, surfaced as [`StoreError::Conflict`]),
//! not only by the application-level pre-check, so concurrent
//! registrations for the same handle cannot both commit.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Account, Post};

pub mod memory;
pub mod postgres;

pub use postgres::{PgAccountStore, PgPostStore};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The write collided with an existing unique record.
    #[error("record conflicts with an existing one")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(
        &self,
        handle: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError>;

    async fn by_id(&self, id: i64) -> Result<Option<Account>, StoreError>;

    async fn by_handle(&self, handle: &str) -> Result<Option<Account>, StoreError>;

    async fn by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, content: &str, author: i64) -> Result<Post, StoreError>;

    async fn by_id(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Posts for one author, newest first.
    async fn by_author(&self, author: i64) -> Result<Vec<Post>, StoreError>;
}
