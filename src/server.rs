//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, applies migrations and runs the Axum server.

use crate::config::Config;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::persistence::{
    PgExerciseRepository, PgGymSessionRepository, PgRunningSessionRepository, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, StorageBackend};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the database cannot be reached within the connect timeout.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the application state for the configured backend.
///
/// With a database URL, connects and applies pending migrations; otherwise
/// every service runs on a shared [`InMemoryStore`].
///
/// # Errors
///
/// Returns an error if the database connection or a migration fails.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, data will not survive a restart");
        return Ok(AppState::in_memory(
            Arc::new(InMemoryStore::new()),
            config.token_signing_secret.clone(),
        ));
    };

    let pool = connect_pool(config, database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);

    Ok(AppState::new(
        Arc::new(PgRunningSessionRepository::new(pool.clone())),
        Arc::new(PgGymSessionRepository::new(pool.clone())),
        Arc::new(PgExerciseRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        config.token_signing_secret.clone(),
        StorageBackend::Postgres,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;
    tracing::info!(backend = state.storage_backend.as_str(), "Storage ready");

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
