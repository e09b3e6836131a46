/**
 * Backend Error Types
 *
 * This module defines the HTTP-facing error type of the server. Every handler
 * returns `Result<_, BackendError>`, and lower layers convert into it with `?`.
 *
 * # Error Categories
 *
 * ## Validation Errors
 *
 * Request fields that fail their rules. Rendered as 400 with an itemized
 * `errors` list.
 *
 * ## Business Rule Errors
 *
 * Well-formed requests the current data does not allow: duplicate edges,
 * missing targets, self-follow, duplicate usernames. Rendered as 400.
 *
 * ## Authentication Errors
 *
 * Missing or invalid tokens, insufficient role, ownership mismatch. Rendered as
 * 401.
 *
 * ## Unexpected Errors
 *
 * Store failures and anything else the client cannot fix. Rendered as 500 with
 * the raw message.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::social::SocialError;
use crate::backend::store::StoreError;
use crate::shared::{FieldError, SharedError};

/// Message used for every validation failure
pub const INVALID_PARAMETERS: &str = "The parameters are not valid";

/// Backend-specific error types
///
/// Each variant maps to one HTTP status code, see [`BackendError::status_code`].
///
/// # Usage
///
/// ```rust
/// use recipebook::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("The recipe does not exist");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (business rules, auth, not found)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Store failure outside of the social protocol
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Outcome of a social-edge or cascade operation
    #[error(transparent)]
    SocialError(#[from] SocialError),

    /// Unexpected failure (hashing, token signing)
    #[error("Internal error: {message}")]
    Internal {
        /// Raw failure message
        message: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 business rule failure
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 authentication or authorization failure
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 404 missing resource on a read
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 500 unexpected failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - `StoreError` - 400 for unique violations and rejected patterns, 500 otherwise
    /// - `SocialError` - 401 for ownership, 500 for store failures, 400 otherwise
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::StoreError(err) if err.is_duplicate() || err.is_invalid_pattern() => {
                StatusCode::BAD_REQUEST
            }
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SocialError(err) => match err {
                SocialError::Forbidden => StatusCode::UNAUTHORIZED,
                SocialError::Store(err) if err.is_duplicate() => StatusCode::BAD_REQUEST,
                SocialError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Server errors carry the raw failure text; client errors carry a
    /// message meant for the end user.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(_) => INVALID_PARAMETERS.to_string(),
            Self::StoreError(err) if err.is_duplicate() => "The record already exists".to_string(),
            Self::StoreError(err) if err.is_invalid_pattern() => INVALID_PARAMETERS.to_string(),
            Self::StoreError(err) => err.to_string(),
            Self::SocialError(SocialError::Store(err)) if err.is_duplicate() => {
                SocialError::AlreadyExists.to_string()
            }
            Self::SocialError(err) => err.to_string(),
            Self::Internal { message } => message.clone(),
        }
    }

    /// Itemized field failures, present only for validation errors
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::SharedError(err) => Some(err.field_errors()),
            // only the recipe title filter reaches the database as a pattern
            Self::StoreError(err) if err.is_invalid_pattern() => Some(vec![FieldError::new(
                "title",
                "must be a valid search pattern",
            )]),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(err.to_string())
    }
}
