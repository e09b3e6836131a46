/**
 * Server Initialization
 *
 * This module turns a [`ServerConfig`] into a ready-to-serve router:
 *
 * 1. Open the store (PostgreSQL pool plus migrations, or the in-memory store)
 * 2. Build the application state
 * 3. Create the router with all routes
 */
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::backend::routes::create_router;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, Store};

/// Startup failures
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open the store selected by the configuration
///
/// With a `DATABASE_URL` this connects a pool and runs the migrations under
/// `migrations/`. Without one it returns an empty [`MemoryStore`].
pub async fn load_store(config: &ServerConfig) -> Result<Arc<dyn Store>, InitError> {
    let Some(database_url) = &config.database_url else {
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(PgStore::new(pool)))
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be reached or migrated.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing recipebook backend server");

    let store = load_store(config).await?;
    let app_state = AppState::new(store, config.auth.clone());

    tracing::info!("Router configured");
    Ok(create_router(app_state))
}
