//! Session service layer - login, refresh, and logout

use std::sync::Arc;
use thiserror::Error;

use crate::auth::jwt::{CredentialIssuer, CredentialVerifier, TokenError, TokenKind};
use crate::auth::password::{PasswordError, PasswordHasher};
use crate::auth::revocation::RevocationStore;
use crate::store::{AccountStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    /// Unknown handle and wrong password collapse into the same kind so
    /// a caller cannot probe which accounts exist.
    #[error("unknown account or wrong password")]
    NotFound,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Access/refresh token pair issued at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct SessionService {
    accounts: Arc<dyn AccountStore>,
    revocations: Arc<dyn RevocationStore>,
    hasher: PasswordHasher,
    issuer: CredentialIssuer,
    verifier: CredentialVerifier,
}

impl SessionService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        revocations: Arc<dyn RevocationStore>,
        hasher: PasswordHasher,
        issuer: CredentialIssuer,
        verifier: CredentialVerifier,
    ) -> Self {
        Self {
            accounts,
            revocations,
            hasher,
            issuer,
            verifier,
        }
    }

    /// Check the password and mint a fresh access/refresh pair.
    pub async fn login(&self, handle: &str, password: &str) -> Result<TokenPair, SessionError> {
        let account = self
            .accounts
            .by_handle(handle)
            .await?
            .ok_or(SessionError::NotFound)?;

        let matches = self
            .hasher
            .verify(account.password_hash.clone(), password.to_string())
            .await?;
        if !matches {
            tracing::debug!(account_id = account.id, "login rejected: password mismatch");
            return Err(SessionError::NotFound);
        }

        Ok(TokenPair {
            access: self.issuer.issue_access(account.id)?,
            refresh: self.issuer.issue_refresh(account.id)?,
        })
    }

    /// Mint a new access token from a valid refresh token.
    ///
    /// The refresh token is not rotated: it stays valid unchanged until
    /// its natural expiry or an explicit logout.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let account_id = self
            .verifier
            .verify(refresh_token, TokenKind::Refresh)
            .await?;

        Ok(self.issuer.issue_access(account_id)?)
    }

    /// Revoke both tokens of a session.
    ///
    /// Only signature, expiry, and claim shape are checked here, not
    /// the denylist, so logging out an already-revoked pair still
    /// succeeds. Both tokens must belong to the same account.
    pub async fn logout(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), SessionError> {
        let access_id = self.verifier.decode(access_token, TokenKind::Access)?;
        let refresh_id = self.verifier.decode(refresh_token, TokenKind::Refresh)?;
        if access_id != refresh_id {
            return Err(SessionError::Token(TokenError::MalformedClaims));
        }

        self.revocations
            .revoke(access_token)
            .await
            .map_err(TokenError::Store)?;
        self.revocations
            .revoke(refresh_token)
            .await
            .map_err(TokenError::Store)?;

        tracing::info!(account_id = access_id, "session revoked");
        Ok(())
    }

    /// Verify an access token presented by a protected endpoint.
    pub async fn verify_access(&self, token: &str) -> Result<i64, SessionError> {
        Ok(self.verifier.verify(token, TokenKind::Access).await?)
    }
}
