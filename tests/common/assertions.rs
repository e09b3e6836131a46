//! Envelope assertions
//!
//! Every response body is an envelope; these helpers check its `status`
//! marker together with the HTTP status and hand back the interesting part.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert a `success` envelope with `status` and return its `data`
pub fn assert_success(response: &TestResponse, status: StatusCode) -> Value {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert_eq!(body["status"], "success", "body: {}", body);
    body["data"].clone()
}

/// Assert a `fail` envelope with `status` and the given message
pub fn assert_fail(response: &TestResponse, status: StatusCode, message: &str) -> Value {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert_eq!(body["status"], "fail", "body: {}", body);
    assert_eq!(body["message"], message, "body: {}", body);
    body
}

/// Assert a 400 validation failure that names `field`
pub fn assert_invalid_field(response: &TestResponse, field: &str) {
    let body = assert_fail(
        response,
        StatusCode::BAD_REQUEST,
        "The parameters are not valid",
    );
    let errors = body["errors"].as_array().cloned().unwrap_or_default();
    assert!(
        errors.iter().any(|e| e["field"] == field),
        "expected an error on '{}', got {}",
        field,
        body
    );
}

/// Assert a 204 with an empty body
pub fn assert_no_content(response: &TestResponse) {
    assert_eq!(
        response.status_code(),
        StatusCode::NO_CONTENT,
        "unexpected status, body: {}",
        response.text()
    );
    assert!(response.text().is_empty());
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
