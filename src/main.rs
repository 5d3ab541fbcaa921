//! Chirp Backend Server
//!
//! A minimal microblogging backend: account registration with bcrypt
//! credential storage, cookie-carried access/refresh tokens, explicit
//! session revocation via a Redis denylist, and simple post storage in
//! Postgres.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use redis::aio::ConnectionManager;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::time::{sleep, Duration};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use chirp_server::app_state::AppState;
use chirp_server::auth::jwt::{CredentialIssuer, CredentialVerifier};
use chirp_server::auth::password::PasswordHasher;
use chirp_server::auth::revocation::{RedisRevocationStore, RevocationStore};
use chirp_server::config::Config;
use chirp_server::routes;
use chirp_server::services::{AccountService, PostService, SessionService};
use chirp_server::store::{AccountStore, PgAccountStore, PgPostStore, PostStore};

const DATABASE_RETRY_DELAY_MILLIS: u64 = 500;
const REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    info!("backend starting");

    let pool = connect_with_retry(&config.database_url()).await;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let redis_client =
        redis::Client::open(config.redis_url()).context("invalid redis connection parameters")?;
    let redis_conn = ConnectionManager::new(redis_client)
        .await
        .context("failed to connect to redis")?;

    let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(pool.clone()));
    let posts: Arc<dyn PostStore> = Arc::new(PgPostStore::new(pool));
    let revocations: Arc<dyn RevocationStore> = Arc::new(RedisRevocationStore::new(redis_conn));

    let hasher = PasswordHasher::default();
    let issuer = CredentialIssuer::new(&config.secret_key);
    let verifier = CredentialVerifier::new(&config.secret_key, revocations.clone());

    let state = AppState::new(
        Arc::new(AccountService::new(
            accounts.clone(),
            hasher,
            config.password_policy,
        )),
        Arc::new(SessionService::new(
            accounts,
            revocations,
            hasher,
            issuer,
            verifier,
        )),
        Arc::new(PostService::new(posts)),
    );

    let app = routes::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            REQUEST_TIMEOUT_SECONDS,
        )))
        .layer(build_cors_layer(&config.cors_origin));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    info!("backend serving on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// The database may come up after us; retry until it answers.
async fn connect_with_retry(database_url: &str) -> PgPool {
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(err) => {
                warn!(error = %err, "database not ready; retrying");
                sleep(Duration::from_millis(DATABASE_RETRY_DELAY_MILLIS)).await;
            }
        }
    }
}

fn build_cors_layer(cors_origin: &str) -> CorsLayer {
    let allowed_origins = cors_origin
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true)
}
