//! Recipebook - Main Library
//!
//! Recipebook is a recipe-sharing REST API: users publish recipes, sort them
//! into categories, follow each other and like recipes. Social actions update
//! two or three records at once and run inside one store transaction.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Domain records (users, recipes, categories, follows, likes)
//!   - The JSON response envelope
//!   - Validation rules and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and extractors
//!   - JWT authentication and bcrypt password hashing
//!   - The `Store` repository with PostgreSQL and in-memory backends
//!   - The paired-write protocol for follows and likes
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use recipebook::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
