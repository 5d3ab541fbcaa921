//! Post creation and retrieval handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;

use super::ACCESS_COOKIE;
use crate::app_state::AppState;
use crate::error::{status_envelope, ApiError};
use crate::models::CreatePostRequest;

pub async fn make_post(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Forbidden)?;
    let author = state.session_service.verify_access(&access_token).await?;

    let Json(request) = payload.map_err(|_| ApiError::Forbidden)?;
    state.post_service.create(&request.content, author).await?;

    Ok(status_envelope(StatusCode::CREATED))
}

pub async fn get_post(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::InvalidInput)?;

    let post = state.post_service.get(id).await?;

    Ok(Json(post))
}
