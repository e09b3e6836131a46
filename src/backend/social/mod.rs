//! Social Module
//!
//! Follow and Like edges: the paired-write operations that keep the user and
//! recipe counters in step with the edge collections, plus the HTTP handlers
//! for `/follows`, `/likes` and the per-user edge routes.
//!
//! # Module Structure
//!
//! ```text
//! social/
//! ├── mod.rs       - Module exports
//! ├── service.rs   - follow / unfollow / like / unlike, cascading deletes
//! └── handlers.rs  - HTTP handlers
//! ```

/// Paired-write operations
pub mod service;

/// HTTP handlers for edge endpoints
pub mod handlers;

pub use service::SocialError;
