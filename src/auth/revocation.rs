//! Token revocation denylist.
//!
//! Signed tokens are stateless, so logout works by recording the exact
//! token string in an external key-value store until it would have
//! expired on its own. Entries carry a TTL one hour past the longest
//! token lifetime and are then forgotten. The backing store must be
//! read-your-writes consistent: a revoke by one request has to be
//! visible to every later verify.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::RwLock;

/// Longest token lifetime is 24 hours; keep entries an extra hour so a
/// token can never outlive its denylist record.
pub const REVOCATION_TTL_SECONDS: u64 = 25 * 60 * 60;

const KEY_PREFIX: &str = "revoked:";

#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("revocation store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a token as revoked. Idempotent: revoking an
    /// already-revoked token succeeds silently.
    async fn revoke(&self, token: &str) -> Result<(), RevocationError>;

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError>;
}

pub struct RedisRevocationStore {
    conn: Arc<RwLock<ConnectionManager>>,
}

impl RedisRevocationStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn: Arc::new(RwLock::new(conn)),
        }
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str) -> Result<(), RevocationError> {
        let mut conn = self.conn.write().await;
        let key = format!("{KEY_PREFIX}{token}");

        // SETEX overwrites an existing tombstone, so repeats are a no-op.
        conn.set_ex::<_, _, ()>(&key, "", REVOCATION_TTL_SECONDS)
            .await
            .map_err(|e| RevocationError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let mut conn = self.conn.write().await;
        let key = format!("{KEY_PREFIX}{token}");

        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| RevocationError::Unavailable(e.to_string()))?;

        Ok(exists)
    }
}

/// In-memory denylist used by the test suites. TTL handling is not
/// modelled; expired tokens fail verification before the revocation
/// lookup regardless.
#[derive(Default)]
pub struct MemoryRevocationStore {
    revoked: Mutex<HashSet<String>>,
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token: &str) -> Result<(), RevocationError> {
        let mut revoked = self.revoked.lock().expect("revocation set poisoned");
        revoked.insert(token.to_string());
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let revoked = self.revoked.lock().expect("revocation set poisoned");
        Ok(revoked.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let store = MemoryRevocationStore::default();

        store.revoke("token-a").await.unwrap();
        store.revoke("token-a").await.unwrap();

        assert!(store.is_revoked("token-a").await.unwrap());
        assert!(!store.is_revoked("token-b").await.unwrap());
    }

    #[test]
    fn ttl_exceeds_longest_token_lifetime() {
        assert!(REVOCATION_TTL_SECONDS > 24 * 60 * 60);
    }
}
