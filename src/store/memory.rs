//! In-memory store backends.
//!
//! Used by the test suites in place of Postgres. Uniqueness is checked
//! under the same lock as the insert, mirroring what the database
//! constraints guarantee.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use super::{AccountStore, PostStore, StoreError};
use crate::models::{Account, Post};

#[derive(Default)]
pub struct MemAccountStore {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountStore for MemAccountStore {
    async fn create(
        &self,
        handle: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.lock().expect("account store poisoned");

        if accounts
            .iter()
            .any(|a| a.handle == handle || a.email == email)
        {
            return Err(StoreError::Conflict);
        }

        let account = Account {
            id: accounts.len() as i64 + 1,
            handle: handle.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        accounts.push(account.clone());

        Ok(account)
    }

    async fn by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().expect("account store poisoned");
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn by_handle(&self, handle: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().expect("account store poisoned");
        Ok(accounts.iter().find(|a| a.handle == handle).cloned())
    }

    async fn by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().expect("account store poisoned");
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }
}

#[derive(Default)]
pub struct MemPostStore {
    posts: Mutex<Vec<Post>>,
}

#[async_trait]
impl PostStore for MemPostStore {
    async fn create(&self, content: &str, author: i64) -> Result<Post, StoreError> {
        let mut posts = self.posts.lock().expect("post store poisoned");

        let post = Post {
            id: posts.len() as i64 + 1,
            content: content.to_string(),
            author,
            post_time: Utc::now().timestamp(),
        };
        posts.push(post.clone());

        Ok(post)
    }

    async fn by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.lock().expect("post store poisoned");
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn by_author(&self, author: i64) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.lock().expect("post store poisoned");
        let mut matching: Vec<Post> = posts.iter().filter(|p| p.author == author).cloned().collect();
        matching.sort_by(|a, b| b.post_time.cmp(&a.post_time));
        Ok(matching)
    }
}
