/**
 * Error Conversion
 *
 * `IntoResponse` for backend errors. Every error becomes an envelope:
 *
 * ```json
 * { "status": "fail", "message": "The parameters are not valid",
 *   "errors": [{ "field": "email", "message": "must be a valid email address" }] }
 *
 * { "status": "error", "message": "database error: pool timed out" }
 * ```
 *
 * 4xx responses use `fail`, 5xx responses use `error`.
 */
use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;
use crate::shared::Envelope;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let envelope = if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
            Envelope::error(message)
        } else {
            tracing::debug!(status = status.as_u16(), %message, "request rejected");
            Envelope::fail(message, self.field_errors())
        };

        (status, Json(envelope)).into_response()
    }
}
