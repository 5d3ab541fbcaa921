//! Account info and listing handlers

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::PostList;

pub async fn get_account_info(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::InvalidInput)?;

    let account = state.account_service.info(id).await?;

    Ok(Json(account))
}

pub async fn get_account_posts(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::InvalidInput)?;

    // Listing an account with no posts yields an empty list, but the
    // account itself must exist.
    state.account_service.info(id).await?;
    let posts = state.post_service.by_author(id).await?;

    Ok(Json(PostList { posts }))
}
