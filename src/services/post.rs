//! Post service layer - creating and reading posts

use std::sync::Arc;
use thiserror::Error;

use crate::models::Post;
use crate::store::{PostStore, StoreError};

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post content must not be empty")]
    EmptyContent,
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn create(&self, content: &str, author: i64) -> Result<Post, PostError> {
        if content.is_empty() {
            return Err(PostError::EmptyContent);
        }

        let post = self.posts.create(content, author).await?;
        tracing::info!(post_id = post.id, author, "post created");
        Ok(post)
    }

    pub async fn get(&self, id: i64) -> Result<Post, PostError> {
        self.posts.by_id(id).await?.ok_or(PostError::NotFound)
    }

    pub async fn by_author(&self, author: i64) -> Result<Vec<Post>, PostError> {
        Ok(self.posts.by_author(author).await?)
    }
}
