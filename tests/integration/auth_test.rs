//! Authentication API integration tests
//!
//! Signup, login and the current-user endpoint.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use recipebook::backend::auth::sessions::verify_token;
use recipebook::shared::models::Role;

use crate::common::*;

fn signup_body() -> serde_json::Value {
    json!({
        "username": "  Ana  ",
        "email": "Ana@Example.com",
        "password": "Secret123",
        "passwordConfirm": "Secret123"
    })
}

#[tokio::test]
async fn test_signup_then_login_then_wrong_password() {
    let app = TestApp::new();

    let response = app.server.post("/auth/signup").json(&signup_body()).await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["user"]["username"], "ana");
    assert_eq!(data["user"]["email"], "ana@example.com");
    assert_eq!(data["user"]["role"], "USER");
    assert!(data["user"].get("passwordHash").is_none());

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": "Secret123" }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    let token = data["token"].as_str().expect("token is a string");
    let claims = verify_token(&app.auth, token).expect("token verifies");
    assert_eq!(claims.username, "ana");
    assert!(claims.exp > chrono::Utc::now().timestamp() as u64);

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": "Wrong1234" }))
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "The email or password is incorrect, please try again",
    );
}

#[tokio::test]
async fn test_login_unknown_email_is_401() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "Secret123" }))
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "The email or password is incorrect, please try again",
    );
}

#[tokio::test]
async fn test_signup_duplicate_username_and_email() {
    let app = TestApp::new();
    app.seed_user("ana", Role::User).await;

    let response = app.server.post("/auth/signup").json(&signup_body()).await;
    assert_fail(
        &response,
        StatusCode::BAD_REQUEST,
        "The username already exists, please try another one",
    );

    let mut body = signup_body();
    body["username"] = json!("bruno");
    let response = app.server.post("/auth/signup").json(&body).await;
    assert_fail(
        &response,
        StatusCode::BAD_REQUEST,
        "The email already exists, please try another one",
    );
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/signup")
        .json(&json!({
            "username": "a",
            "email": "not-an-email",
            "password": "weak",
            "passwordConfirm": "other"
        }))
        .await;
    assert_invalid_field(&response, "username");
    assert_invalid_field(&response, "email");
    assert_invalid_field(&response, "password");
    assert_invalid_field(&response, "passwordConfirm");
}

#[tokio::test]
async fn test_signup_rejects_malformed_json() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/auth/signup")
        .text("{not json")
        .content_type("application/json")
        .await;
    assert_invalid_field(&response, "body");
}

#[tokio::test]
async fn test_me_requires_a_token() {
    let app = TestApp::new();
    let response = app.server.get("/auth/me").await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You are not logged in, please try again",
    );

    let response = app
        .server
        .get("/auth/me")
        .authorization_bearer("not.a.token")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_the_token_owner() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .get("/auth/me")
        .authorization_bearer(&ana.token)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["id"], ana.id().to_string());
}

#[tokio::test]
async fn test_token_of_deleted_user_stops_working() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .delete(&format!("/users/{}", ana.id()))
        .authorization_bearer(&ana.token)
        .await;
    assert_no_content(&response);

    let response = app
        .server
        .get("/auth/me")
        .authorization_bearer(&ana.token)
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "The user no longer exists",
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "status": "success" }));
}

#[tokio::test]
async fn test_unknown_route_is_404_envelope() {
    let app = TestApp::new();
    let response = app.server.get("/nope").await;
    assert_fail(
        &response,
        StatusCode::NOT_FOUND,
        "The requested route does not exist",
    );
}
