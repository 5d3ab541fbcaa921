//! Account service layer - registration and account lookup

use std::sync::Arc;
use thiserror::Error;

use crate::auth::password::{PasswordError, PasswordHasher};
use crate::config::PasswordPolicy;
use crate::models::Account;
use crate::store::{AccountStore, StoreError};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid registration input")]
    InvalidInput,
    #[error("handle or email already registered")]
    AlreadyExists,
    #[error("account not found")]
    NotFound,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            // The database uniqueness constraint rejected the insert;
            // another registration won the race.
            StoreError::Conflict => AccountError::AlreadyExists,
            other => AccountError::Store(other),
        }
    }
}

pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            accounts,
            hasher,
            policy,
        }
    }

    /// Validate, hash, and persist a new account.
    ///
    /// The pre-check against existing handle/email gives a friendly
    /// rejection on the common path; the storage layer's UNIQUE
    /// constraints remain the source of truth under concurrency.
    pub async fn register(
        &self,
        handle: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        if handle.is_empty() || email.is_empty() {
            return Err(AccountError::InvalidInput);
        }
        if password.len() < self.policy.minimum || password.len() > self.policy.maximum {
            return Err(AccountError::InvalidInput);
        }
        if !validator::validate_email(email) {
            return Err(AccountError::InvalidInput);
        }

        if self.accounts.by_handle(handle).await?.is_some()
            || self.accounts.by_email(email).await?.is_some()
        {
            return Err(AccountError::AlreadyExists);
        }

        let hash = self.hasher.hash(password.to_string()).await?;
        let account = self.accounts.create(handle, email, &hash).await?;

        tracing::info!(account_id = account.id, "account registered");
        Ok(account)
    }

    pub async fn info(&self, id: i64) -> Result<Account, AccountError> {
        self.accounts
            .by_id(id)
            .await?
            .ok_or(AccountError::NotFound)
    }
}
