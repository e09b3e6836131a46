//! Success responses
//!
//! Handlers build their successful responses through these helpers so every
//! body is wrapped in the same envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::shared::Envelope;

/// 200 with `data`
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(Envelope::success(data))).into_response()
}

/// 201 with the created record as `data`
pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(Envelope::success(data))).into_response()
}

/// 204, empty body
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
