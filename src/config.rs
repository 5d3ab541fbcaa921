//! Process configuration loaded once at startup.
//!
//! All tunables come from the environment (optionally via a `.env` file).
//! The resulting `Config` is immutable and handed to every service
//! constructor; nothing reads the environment after startup.

use anyhow::{Context, Result};
use std::env;

/// Accepted password length bounds for registration.
#[derive(Clone, Copy, Debug)]
pub struct PasswordPolicy {
    pub minimum: usize,
    pub maximum: usize,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub cors_origin: String,
    /// Symmetric HS256 signing secret. Changing it invalidates every
    /// outstanding token.
    pub secret_key: String,
    pub password_policy: PasswordPolicy,

    database_user: String,
    database_pass: String,
    database_name: String,
    database_host: String,

    redis_addr: String,
    redis_pass: String,
    redis_db: u8,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let password_policy = PasswordPolicy {
            minimum: required("MINIMUM_PASSWORD_LENGTH")?
                .parse()
                .context("unable to parse MINIMUM_PASSWORD_LENGTH")?,
            maximum: required("MAXIMUM_PASSWORD_LENGTH")?
                .parse()
                .context("unable to parse MAXIMUM_PASSWORD_LENGTH")?,
        };

        Ok(Self {
            listen_addr: required("LISTEN_ADDRESS")?,
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            secret_key: required("SECRET_KEY")?,
            password_policy,
            database_user: required("DATABASE_USER")?,
            database_pass: required("DATABASE_PASS")?,
            database_name: required("DATABASE_NAME")?,
            database_host: required("DATABASE_HOST")?,
            redis_addr: required("REDIS_ADDR")?,
            redis_pass: env::var("REDIS_PASS").unwrap_or_default(),
            redis_db: env::var("REDIS_DB")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .context("unable to parse REDIS_DB")?,
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}?sslmode=disable",
            self.database_user, self.database_pass, self.database_host, self.database_name
        )
    }

    pub fn redis_url(&self) -> String {
        if self.redis_pass.is_empty() {
            format!("redis://{}/{}", self.redis_addr, self.redis_db)
        } else {
            format!("redis://:{}@{}/{}", self.redis_pass, self.redis_addr, self.redis_db)
        }
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}
