//! Boundary error mapping.
//!
//! Each service returns a closed error-kind enum; this module folds
//! them into transport-level codes exactly once. Clients only ever see
//! the `{"status": <code>}` envelope with a matching HTTP status —
//! full detail stays in the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::jwt::TokenError;
use crate::services::{AccountError, PostError, SessionError};
use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    InvalidInput,
    Forbidden,
    NotFound,
    Unavailable(String),
    Internal(String),
}

/// The bare status envelope every non-payload response uses.
pub fn status_envelope(status: StatusCode) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(json!({ "status": status.as_u16() })))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable(detail) => {
                tracing::error!(%detail, "backing store unavailable");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status_envelope(status).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidInput => ApiError::InvalidInput,
            AccountError::AlreadyExists => {
                tracing::debug!("registration rejected: already exists");
                ApiError::Forbidden
            }
            AccountError::NotFound => ApiError::NotFound,
            AccountError::Password(e) => ApiError::Internal(e.to_string()),
            AccountError::Store(StoreError::Conflict) => ApiError::Forbidden,
            AccountError::Store(StoreError::Unavailable(detail)) => ApiError::Unavailable(detail),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound => ApiError::NotFound,
            SessionError::Token(token_err) => token_err.into(),
            SessionError::Password(e) => ApiError::Internal(e.to_string()),
            SessionError::Store(StoreError::Unavailable(detail)) => ApiError::Unavailable(detail),
            SessionError::Store(StoreError::Conflict) => {
                ApiError::Internal("unexpected store conflict".to_string())
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            // Expired and revoked must be indistinguishable externally;
            // the distinct kinds survive only in the log line.
            TokenError::InvalidSignature
            | TokenError::Expired
            | TokenError::MalformedClaims
            | TokenError::Revoked => {
                tracing::warn!(kind = %err, "token verification failed");
                ApiError::Forbidden
            }
            TokenError::Signing(detail) => ApiError::Internal(detail),
            TokenError::Store(e) => ApiError::Unavailable(e.to_string()),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::EmptyContent => ApiError::Forbidden,
            PostError::NotFound => ApiError::NotFound,
            PostError::Store(StoreError::Unavailable(detail)) => ApiError::Unavailable(detail),
            PostError::Store(StoreError::Conflict) => {
                ApiError::Internal("unexpected store conflict".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::revocation::RevocationError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn token_failures_all_surface_as_forbidden() {
        for err in [
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::MalformedClaims,
            TokenError::Revoked,
        ] {
            assert_eq!(status_of(err.into()), StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn store_outage_surfaces_as_internal() {
        let err = TokenError::Store(RevocationError::Unavailable("connection refused".into()));
        assert_eq!(status_of(err.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn login_failure_is_not_found() {
        assert_eq!(status_of(SessionError::NotFound.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_registration_is_forbidden() {
        assert_eq!(
            status_of(AccountError::AlreadyExists.into()),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn validation_failure_is_bad_request() {
        assert_eq!(
            status_of(AccountError::InvalidInput.into()),
            StatusCode::BAD_REQUEST
        );
    }
}
