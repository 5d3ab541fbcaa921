//! API handlers for the chirp backend

pub mod account;
pub mod auth;
pub mod post;

pub use account::{get_account_info, get_account_posts};
pub use auth::{expire, logged_in, login, refresh, register};
pub use post::{get_post, make_post};

/// Cookie carrying the access token, scoped to the whole API.
pub const ACCESS_COOKIE: &str = "auth";
/// Cookie carrying the refresh token, scoped to the auth path only.
pub const REFRESH_COOKIE: &str = "refresh";
