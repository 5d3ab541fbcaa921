//! Route definitions for the chirp API

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::app_state::AppState;
use crate::error::status_envelope;
use crate::handlers::*;

// Registration and session routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", axum::routing::post(register))
        .route("/auth/login", axum::routing::post(login))
        .route("/auth/refresh", axum::routing::post(refresh))
        .route("/auth/expire", axum::routing::post(expire))
        .route("/auth/logged_in", get(logged_in))
}

// Account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account/:id/info", get(get_account_info))
        .route("/account/:id/posts", get(get_account_posts))
}

// Post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/post", axum::routing::post(make_post))
        .route("/post/:id", get(get_post))
}

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(auth_routes())
        .merge(account_routes())
        .merge(post_routes())
        .fallback(not_found)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "msg": "Hello, World!" }))
}

async fn not_found() -> impl axum::response::IntoResponse {
    status_envelope(StatusCode::NOT_FOUND)
}
