//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router creation and tower-http layers
//! └── api_routes.rs   - Resource routes (auth, users, categories, recipes, edges)
//! ```
//!
//! # Route Types
//!
//! ## Authentication
//!
//! - `POST /auth/signup`, `POST /auth/login`, `GET /auth/me`
//!
//! ## Resources
//!
//! - `/users`, `/users/{id}` - User CRUD
//! - `/categories`, `/categories/{id}` - Category CRUD
//! - `/recipes`, `/recipes/{id}` - Recipe CRUD
//!
//! ## Social Edges
//!
//! - `/follows`, `/likes` - Flat edge collections
//! - `/users/{id}/followings`, `/users/{id}/followers`, `/users/{id}/likes`
//!
//! Unknown paths fall through to a 404 envelope.

/// Main router creation
pub mod router;

/// Resource route tables
pub mod api_routes;

pub use router::create_router;
