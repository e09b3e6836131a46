/**
 * Response Envelope
 *
 * Every JSON response body produced by the API is wrapped in an `Envelope`:
 *
 * ```json
 * { "status": "success", "data": { ... } }
 * { "status": "fail", "message": "The parameters are not valid", "errors": [ ... ] }
 * { "status": "error", "message": "connection refused" }
 * ```
 *
 * `fail` is used for client errors (4xx) and `error` for unexpected failures (5xx).
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::FieldError;

/// Outcome marker carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Fail,
    Error,
}

/// Uniform JSON response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
            errors: None,
        }
    }
}

impl Envelope<()> {
    /// Client-error response
    pub fn fail(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            status: EnvelopeStatus::Fail,
            data: None,
            message: Some(message.into()),
            errors,
        }
    }

    /// Server-error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    /// Bare success marker with no payload
    pub fn ok() -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: None,
            message: None,
            errors: None,
        }
    }
}
