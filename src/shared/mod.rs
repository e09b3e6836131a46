//! Shared Module
//!
//! Types shared between the server and anything that talks to it: domain
//! records, the response envelope, validation rules and error types.
//! Nothing in here depends on axum or the database.

/// Shared error types
pub mod error;

/// JSON response envelope
pub mod envelope;

/// Domain records (users, recipes, categories, edges)
pub mod models;

/// Field validation rules
pub mod validation;

/// Re-export commonly used types for convenience
pub use envelope::{Envelope, EnvelopeStatus};
pub use error::{FieldError, SharedError};
pub use validation::Validator;
