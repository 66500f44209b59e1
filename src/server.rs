//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, optional integrations and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::feedback::{DisabledFeedbackClient, FeedbackClient, HttpFeedbackClient};
use crate::infrastructure::storage::{ImageStorage, NullStorage, S3Storage};
use crate::routes::app_router;
use crate::state::{AppState, StateSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - S3 image storage (or NullStorage when no bucket is configured)
/// - Solution review client (or a disabled client)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The review client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let storage: Arc<dyn ImageStorage> = match config.s3_settings() {
        Some(settings) => Arc::new(S3Storage::new(settings)),
        None => {
            tracing::info!("Image storage disabled (NullStorage)");
            Arc::new(NullStorage::new())
        }
    };

    let feedback: Arc<dyn FeedbackClient> = match &config.feedback_url {
        Some(url) => {
            let client = HttpFeedbackClient::new(
                url.clone(),
                Duration::from_secs(config.feedback_timeout_seconds),
            )
            .context("Failed to build feedback client")?;
            tracing::info!("Feedback service enabled");
            Arc::new(client)
        }
        None => {
            tracing::info!("Feedback service disabled");
            Arc::new(DisabledFeedbackClient)
        }
    };

    let state = AppState::new(
        Arc::new(pool),
        cache,
        storage,
        feedback,
        StateSettings {
            token_signing_secret: config.token_signing_secret.clone(),
            max_image_bytes: config.max_image_bytes,
        },
    );

    let app = app_router(state, config.behind_proxy, config.max_image_bytes);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves on Ctrl+C so in-flight requests can finish before exit.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
