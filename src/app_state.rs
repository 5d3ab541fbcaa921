//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::{AccountService, PostService, SessionService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub session_service: Arc<SessionService>,
    pub post_service: Arc<PostService>,
}

impl AppState {
    pub fn new(
        account_service: Arc<AccountService>,
        session_service: Arc<SessionService>,
        post_service: Arc<PostService>,
    ) -> Self {
        Self {
            account_service,
            session_service,
            post_service,
        }
    }
}

impl FromRef<AppState> for Arc<AccountService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.account_service.clone()
    }
}

impl FromRef<AppState> for Arc<SessionService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_service.clone()
    }
}

impl FromRef<AppState> for Arc<PostService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.post_service.clone()
    }
}
