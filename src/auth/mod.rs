//! Authentication primitives for the chirp backend
//!
//! - bcrypt password hashing and verification
//! - signed access/refresh token issuance and validation
//! - a Redis-backed denylist for revoking tokens before expiry

pub mod jwt;
pub mod password;
pub mod revocation;

pub use jwt::{CredentialIssuer, CredentialVerifier, TokenError, TokenKind};
pub use password::PasswordHasher;
pub use revocation::{RedisRevocationStore, RevocationStore};
