//! Category API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use recipebook::shared::models::Role;

use crate::common::*;

#[tokio::test]
async fn test_admin_creates_and_deletes_categories() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", Role::Admin).await;

    let response = app
        .server
        .post("/categories")
        .authorization_bearer(&admin.token)
        .json(&json!({ "name": "  Desserts " }))
        .await;
    let data = assert_success(&response, StatusCode::CREATED);
    assert_eq!(data["name"], "Desserts");
    let id = data["id"].as_str().expect("id").to_string();

    let response = app.server.get("/categories").await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(1));

    let response = app.server.get(&format!("/categories/{}", id)).await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["name"], "Desserts");

    let response = app
        .server
        .delete(&format!("/categories/{}", id))
        .authorization_bearer(&admin.token)
        .await;
    assert_no_content(&response);

    let response = app
        .server
        .delete(&format!("/categories/{}", id))
        .authorization_bearer(&admin.token)
        .await;
    assert_fail(
        &response,
        StatusCode::BAD_REQUEST,
        "Operation could not be completed",
    );

    let response = app.server.get(&format!("/categories/{}", id)).await;
    assert_fail(
        &response,
        StatusCode::NOT_FOUND,
        "The category does not exist",
    );
}

#[tokio::test]
async fn test_regular_users_cannot_manage_categories() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let category = app.seed_category("Soups").await;

    let response = app
        .server
        .post("/categories")
        .authorization_bearer(&ana.token)
        .json(&json!({ "name": "Snacks" }))
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You do not have permission to access the requested resource",
    );

    let response = app
        .server
        .delete(&format!("/categories/{}", category.id))
        .authorization_bearer(&ana.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.post("/categories").json(&json!({ "name": "Snacks" })).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_category_name_is_validated() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", Role::Admin).await;

    let response = app
        .server
        .post("/categories")
        .authorization_bearer(&admin.token)
        .json(&json!({ "name": " x " }))
        .await;
    assert_invalid_field(&response, "name");
}

#[tokio::test]
async fn test_deleting_a_category_detaches_recipes() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", Role::Admin).await;
    let ana = app.seed_user("ana", Role::User).await;
    let category = app.seed_category("Soups").await;

    let mut body = recipe_body("Gazpacho andaluz");
    body["category"] = json!(category.id);
    let response = app
        .server
        .post("/recipes")
        .authorization_bearer(&ana.token)
        .json(&body)
        .await;
    let data = assert_success(&response, StatusCode::CREATED);
    let recipe_id: Uuid = data["id"].as_str().expect("id").parse().expect("uuid");

    let response = app
        .server
        .delete(&format!("/categories/{}", category.id))
        .authorization_bearer(&admin.token)
        .await;
    assert_no_content(&response);

    assert_eq!(app.recipe(recipe_id).await.category, None);
    let response = app.server.get(&format!("/recipes/{}", recipe_id)).await;
    let data = assert_success(&response, StatusCode::OK);
    assert!(data["category"].is_null());
}
