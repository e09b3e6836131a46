//! Backend Module
//!
//! This module contains all server-side code for the recipe API. It is only
//! compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, startup
//! - **`routes`** - Router assembly and tower-http layers
//! - **`auth`** - Signup, login, JWT tokens, password hashing
//! - **`users`** - User CRUD
//! - **`categories`** - Category CRUD
//! - **`recipes`** - Recipe CRUD, filtering and population
//! - **`social`** - Follows and likes (paired writes, cascades)
//! - **`store`** - `Store` trait with PostgreSQL and in-memory backends
//! - **`middleware`** - Auth and validation extractors
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── users/          - User handlers and registration
//! ├── categories.rs   - Category handlers
//! ├── recipes/        - Recipe handlers and population
//! ├── social/         - Follow and like protocol
//! ├── store/          - Persistence
//! ├── middleware/     - Extractors
//! ├── reply.rs        - Success envelope helpers
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Every handler validates its input, performs a few store operations
//! (inside a unit of work when several records change together) and
//! answers with a JSON envelope. Handlers return
//! `Result<Response, BackendError>`; the error renders itself.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication
pub mod auth;

/// Request extractors
pub mod middleware;

/// Success responses
pub mod reply;

/// Persistence
pub mod store;

/// User management
pub mod users;

/// Category management
pub mod categories;

/// Recipe management
pub mod recipes;

/// Follows and likes
pub mod social;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
