//! Data models for the chirp backend

use serde::{Deserialize, Serialize};

/// Account model
///
/// The password hash is internal-only and never serialized into a
/// response body.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub handle: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "pw_hash")]
    pub password_hash: String,
}

/// Post model
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub author: i64,
    #[serde(rename = "when")]
    #[sqlx(rename = "post_time")]
    pub post_time: i64,
}

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub handle: String,
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub handle: String,
    pub password: String,
}

/// Post creation request payload
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// Listing wrapper for an account's posts
#[derive(Debug, Serialize)]
pub struct PostList {
    pub posts: Vec<Post>,
}
