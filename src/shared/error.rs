//! Shared Error Types
//!
//! This module defines error types that are shared between the HTTP layer and
//! anything else that speaks the recipebook wire format (clients, tests).
//! These errors represent input problems that are detected before any
//! store access happens.
//!
//! # Error Categories
//!
//! - `ValidationError` - One or more request fields failed validation
//! - `InvalidRole` - A role string did not name a known role
//!
//! # Usage
//!
//! ```rust
//! use recipebook::shared::error::SharedError;
//!
//! // Create a validation error for a single field
//! let error = SharedError::validation("username", "must be between 2 and 16 characters");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single itemized validation failure
///
/// Rendered inside the `errors` array of a `fail` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field, as it appears on the wire
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    ///
    /// Always carries at least one field error.
    #[error("The parameters are not valid")]
    ValidationError {
        /// Every field that failed, in the order it was checked
        errors: Vec<FieldError>,
    },

    /// Unknown role name
    #[error("Unknown role '{value}'")]
    InvalidRole {
        /// The rejected value
        value: String,
    },
}

impl SharedError {
    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Create a validation error from an already collected list
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }

    /// Create an unknown-role error
    pub fn invalid_role(value: impl Into<String>) -> Self {
        Self::InvalidRole {
            value: value.into(),
        }
    }

    /// The itemized field errors carried by this error
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::ValidationError { errors } => errors.clone(),
            Self::InvalidRole { value } => {
                vec![FieldError::new("role", format!("'{}' is not a valid role", value))]
            }
        }
    }
}
