//! User API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use recipebook::shared::models::Role;

use crate::common::*;

#[tokio::test]
async fn test_list_and_get_users() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    app.seed_user("bruno", Role::User).await;

    let response = app.server.get("/users").await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(2));

    let response = app.server.get(&format!("/users/{}", ana.id())).await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["username"], "ana");
    assert_eq!(data["followers"], 0);

    let response = app.server.get(&format!("/users/{}", Uuid::new_v4())).await;
    assert_fail(&response, StatusCode::NOT_FOUND, "The user does not exist");

    let response = app.server.get("/users/not-a-uuid").await;
    assert_invalid_field(&response, "id");
}

#[tokio::test]
async fn test_only_admins_create_users() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", Role::Admin).await;
    let ana = app.seed_user("ana", Role::User).await;
    let body = json!({
        "username": "chef",
        "email": "chef@example.com",
        "password": "Secret123",
        "passwordConfirm": "Secret123",
        "role": "ADMIN"
    });

    let response = app
        .server
        .post("/users")
        .authorization_bearer(&ana.token)
        .json(&body)
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You do not have permission to access the requested resource",
    );

    let response = app
        .server
        .post("/users")
        .authorization_bearer(&admin.token)
        .json(&body)
        .await;
    let data = assert_success(&response, StatusCode::CREATED);
    assert_eq!(data["username"], "chef");
    assert_eq!(data["role"], "ADMIN");
}

#[tokio::test]
async fn test_user_updates_own_profile() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .patch(&format!("/users/{}", ana.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "username": "AnaMaria", "photo": "https://img.example.com/ana.png" }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["username"], "anamaria");
    assert_eq!(data["photo"], "https://img.example.com/ana.png");
}

#[tokio::test]
async fn test_user_cannot_update_someone_else() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;

    let response = app
        .server
        .patch(&format!("/users/{}", bruno.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "username": "hacked" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.user(bruno.id()).await.username, "bruno");
}

#[tokio::test]
async fn test_invalid_update_of_someone_else_is_unauthorized() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;

    let response = app
        .server
        .patch(&format!("/users/{}", bruno.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "email": "not-an-email", "followers": 100 }))
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You do not have permission to perform this operation",
    );
    assert_eq!(app.user(bruno.id()).await.email, "bruno@example.com");
}

#[tokio::test]
async fn test_role_change_needs_admin() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", Role::Admin).await;
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .patch(&format!("/users/{}", ana.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "role": "ADMIN" }))
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You do not have permission to access the requested resource",
    );

    let response = app
        .server
        .patch(&format!("/users/{}", ana.id()))
        .authorization_bearer(&admin.token)
        .json(&json!({ "role": "ADMIN" }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["role"], "ADMIN");
}

#[tokio::test]
async fn test_update_rejects_password_and_counters() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .patch(&format!("/users/{}", ana.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "password": "Other1234", "followers": 100 }))
        .await;
    assert_invalid_field(&response, "password");
    assert_invalid_field(&response, "followers");
    assert_eq!(app.counters(ana.id()).await, (0, 0, 0));
}

#[tokio::test]
async fn test_update_cannot_take_another_users_email() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    app.seed_user("bruno", Role::User).await;

    let response = app
        .server
        .patch(&format!("/users/{}", ana.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "email": "bruno@example.com" }))
        .await;
    assert_fail(
        &response,
        StatusCode::BAD_REQUEST,
        "The email already exists, please try another one",
    );
}

#[tokio::test]
async fn test_delete_user_cascades_edges_and_counters() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let carla = app.seed_user("carla", Role::User).await;
    let bruno_recipe = app.seed_recipe(&bruno, "Tortilla").await;
    let ana_recipe = app.seed_recipe(&ana, "Gazpacho").await;

    // ana follows bruno, carla follows ana, ana likes bruno's recipe,
    // carla likes ana's recipe
    for (actor, path, body) in [
        (&ana, format!("/users/{}/followings", ana.id()), json!({ "targetUser": bruno.id() })),
        (&carla, format!("/users/{}/followings", carla.id()), json!({ "targetUser": ana.id() })),
        (&ana, format!("/users/{}/likes", ana.id()), json!({ "targetRecipe": bruno_recipe.id })),
        (&carla, format!("/users/{}/likes", carla.id()), json!({ "targetRecipe": ana_recipe.id })),
    ] {
        let response = app
            .server
            .post(&path)
            .authorization_bearer(&actor.token)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = app
        .server
        .delete(&format!("/users/{}", ana.id()))
        .authorization_bearer(&ana.token)
        .await;
    assert_no_content(&response);

    assert_eq!(app.counters(bruno.id()).await, (0, 0, 0));
    assert_eq!(app.counters(carla.id()).await, (0, 0, 0));
    assert_eq!(app.recipe(bruno_recipe.id).await.likes, 0);

    let response = app.server.get(&format!("/recipes/{}", ana_recipe.id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let response = app.server.get(&format!("/users/{}", ana.id())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_permissions() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", Role::Admin).await;
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;

    let response = app
        .server
        .delete(&format!("/users/{}", bruno.id()))
        .authorization_bearer(&ana.token)
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You do not have permission to perform this operation",
    );

    let response = app
        .server
        .delete(&format!("/users/{}", bruno.id()))
        .authorization_bearer(&admin.token)
        .await;
    assert_no_content(&response);

    let response = app
        .server
        .delete(&format!("/users/{}", bruno.id()))
        .authorization_bearer(&admin.token)
        .await;
    assert_fail(&response, StatusCode::BAD_REQUEST, "The user does not exist");
}
