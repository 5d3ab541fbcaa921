//! Registration and session handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::app_state::AppState;
use crate::error::{status_envelope, ApiError};
use crate::models::{LoginRequest, RegisterRequest};

fn access_cookie(token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::minutes(15))
        .build()
}

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/auth")
        .http_only(true)
        .max_age(time::Duration::hours(24))
        .build()
}

fn expired(name: &'static str, path: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path(path)
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build()
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::InvalidInput)?;

    state
        .account_service
        .register(&request.handle, &request.email, &request.password)
        .await?;

    Ok(status_envelope(StatusCode::CREATED))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::InvalidInput)?;
    if request.handle.is_empty() {
        return Err(ApiError::InvalidInput);
    }

    let pair = state
        .session_service
        .login(&request.handle, &request.password)
        .await?;

    let jar = jar
        .add(access_cookie(pair.access))
        .add(refresh_cookie(pair.refresh));

    Ok((jar, status_envelope(StatusCode::OK)))
}

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Forbidden)?;

    // Only a new access token is minted; the refresh cookie stays as-is.
    let access = state.session_service.refresh(&refresh_token).await?;
    let jar = jar.add(access_cookie(access));

    Ok((jar, status_envelope(StatusCode::CREATED)))
}

pub async fn expire(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Forbidden)?;
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Forbidden)?;

    state
        .session_service
        .logout(&access_token, &refresh_token)
        .await?;

    let jar = jar
        .add(expired(ACCESS_COOKIE, "/"))
        .add(expired(REFRESH_COOKIE, "/auth"));

    Ok((jar, status_envelope(StatusCode::CREATED)))
}

pub async fn logged_in(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Forbidden)?;

    state.session_service.verify_access(&access_token).await?;

    Ok(status_envelope(StatusCode::OK))
}
