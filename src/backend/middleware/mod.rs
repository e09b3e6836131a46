//! Middleware Module
//!
//! Request processing that runs before handler logic: authentication and
//! body/path extraction with validation.
//!
//! # Architecture
//!
//! - **`auth`** - `AuthUser` / `AdminUser` extractors (bearer JWT)
//! - **`extract`** - `ValidJson` and `ValidId` extractors that turn rejections
//!   into validation errors
//!
//! # Example
//!
//! ```rust,no_run
//! use recipebook::backend::middleware::{AuthUser, ValidJson};
//!
//! async fn handler(AuthUser(user): AuthUser, ValidJson(body): ValidJson<serde_json::Value>) {
//!     // user is loaded, body is parsed
//! }
//! ```

pub mod auth;

pub mod extract;

pub use auth::{authenticate, AdminUser, AuthUser};
pub use extract::{ValidId, ValidIdPair, ValidJson};
