//! Signed token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with a single process-wide secret.
//! Claims carry the account id as a string subject, issue and expiry
//! timestamps, and an explicit kind so a refresh token cannot be
//! presented where an access token is expected. Access tokens live 15
//! minutes, refresh tokens 24 hours.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::revocation::{RevocationError, RevocationStore};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token claims are malformed")]
    MalformedClaims,
    #[error("token has been revoked")]
    Revoked,
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error(transparent)]
    Store(#[from] RevocationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn lifetime(self) -> Duration {
        match self {
            TokenKind::Access => Duration::minutes(15),
            TokenKind::Refresh => Duration::hours(24),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id, stringified.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub kind: TokenKind,
}

/// Builds signed access and refresh tokens.
#[derive(Clone)]
pub struct CredentialIssuer {
    encoding_key: EncodingKey,
}

impl CredentialIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_access(&self, account_id: i64) -> Result<String, TokenError> {
        self.issue(account_id, TokenKind::Access, TokenKind::Access.lifetime())
    }

    pub fn issue_refresh(&self, account_id: i64) -> Result<String, TokenError> {
        self.issue(account_id, TokenKind::Refresh, TokenKind::Refresh.lifetime())
    }

    fn issue(
        &self,
        account_id: i64,
        kind: TokenKind,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            kind,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Validates signature, expiry, claim shape, and revocation status.
#[derive(Clone)]
pub struct CredentialVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Arc<dyn RevocationStore>,
}

impl CredentialVerifier {
    pub fn new(secret: &str, revocations: Arc<dyn RevocationStore>) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Full verification: signature, expiry, claim shape, then the
    /// denylist. On success returns the account id.
    pub async fn verify(&self, token: &str, expected: TokenKind) -> Result<i64, TokenError> {
        let account_id = self.decode(token, expected)?;

        if self.revocations.is_revoked(token).await? {
            return Err(TokenError::Revoked);
        }

        Ok(account_id)
    }

    /// Signature, expiry, and claim-shape checks without the denylist
    /// lookup. Logout uses this so revoking an already-revoked pair
    /// stays idempotent.
    pub fn decode(&self, token: &str, expected: TokenKind) -> Result<i64, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::MalformedClaims
                }
                _ => TokenError::InvalidSignature,
            }
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::MalformedClaims);
        }

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::MalformedClaims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::revocation::MemoryRevocationStore;

    const SECRET: &str = "test-secret";

    fn verifier(revocations: Arc<dyn RevocationStore>) -> CredentialVerifier {
        CredentialVerifier::new(SECRET, revocations)
    }

    #[tokio::test]
    async fn verify_returns_account_id_after_issuance() {
        let issuer = CredentialIssuer::new(SECRET);
        let verifier = verifier(Arc::new(MemoryRevocationStore::default()));

        let token = issuer.issue_access(42).unwrap();
        let id = verifier.verify(&token, TokenKind::Access).await.unwrap();

        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn access_and_refresh_tokens_differ() {
        let issuer = CredentialIssuer::new(SECRET);

        let access = issuer.issue_access(42).unwrap();
        let refresh = issuer.issue_refresh(42).unwrap();

        assert!(!access.is_empty());
        assert!(!refresh.is_empty());
        assert_ne!(access, refresh);
    }

    #[tokio::test]
    async fn wrong_secret_fails_with_invalid_signature() {
        let issuer = CredentialIssuer::new("another-secret");
        let verifier = verifier(Arc::new(MemoryRevocationStore::default()));

        let token = issuer.issue_access(42).unwrap();
        let err = verifier.verify(&token, TokenKind::Access).await.unwrap_err();

        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[tokio::test]
    async fn expired_token_fails_even_when_revoked() {
        let issuer = CredentialIssuer::new(SECRET);
        let revocations = Arc::new(MemoryRevocationStore::default());
        let verifier = verifier(revocations.clone());

        let token = issuer
            .issue(42, TokenKind::Access, Duration::seconds(-60))
            .unwrap();
        revocations.revoke(&token).await.unwrap();

        let err = verifier.verify(&token, TokenKind::Access).await.unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[tokio::test]
    async fn revoked_token_fails_with_revoked() {
        let issuer = CredentialIssuer::new(SECRET);
        let revocations = Arc::new(MemoryRevocationStore::default());
        let verifier = verifier(revocations.clone());

        let token = issuer.issue_access(42).unwrap();
        revocations.revoke(&token).await.unwrap();

        let err = verifier.verify(&token, TokenKind::Access).await.unwrap_err();
        assert!(matches!(err, TokenError::Revoked));
    }

    #[tokio::test]
    async fn refresh_token_is_rejected_where_access_is_expected() {
        let issuer = CredentialIssuer::new(SECRET);
        let verifier = verifier(Arc::new(MemoryRevocationStore::default()));

        let refresh = issuer.issue_refresh(42).unwrap();
        let err = verifier
            .verify(&refresh, TokenKind::Access)
            .await
            .unwrap_err();

        assert!(matches!(err, TokenError::MalformedClaims));
    }

    #[tokio::test]
    async fn non_integer_subject_is_malformed() {
        let now = Utc::now();
        let claims = Claims {
            sub: "not-a-number".into(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(15)).timestamp(),
            kind: TokenKind::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let verifier = verifier(Arc::new(MemoryRevocationStore::default()));
        let err = verifier.verify(&token, TokenKind::Access).await.unwrap_err();

        assert!(matches!(err, TokenError::MalformedClaims));
    }

    #[tokio::test]
    async fn garbage_token_fails_verification() {
        let verifier = verifier(Arc::new(MemoryRevocationStore::default()));

        let err = verifier
            .verify("definitely.not.a-jwt", TokenKind::Access)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TokenError::InvalidSignature | TokenError::MalformedClaims
        ));
    }
}
