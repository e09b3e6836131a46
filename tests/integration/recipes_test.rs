//! Recipe API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use recipebook::shared::models::Role;

use crate::common::*;

#[tokio::test]
async fn test_create_recipe_sets_author_and_populates() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let category = app.seed_category("Rice").await;

    let mut body = recipe_body("Paella Valenciana");
    body["category"] = json!(category.id);

    let response = app
        .server
        .post("/recipes")
        .authorization_bearer(&ana.token)
        .json(&body)
        .await;
    let data = assert_success(&response, StatusCode::CREATED);
    assert_eq!(data["title"], "Paella Valenciana");
    assert_eq!(data["likes"], 0);
    assert_eq!(
        data["author"],
        json!({ "id": ana.id(), "username": "ana", "email": "ana@example.com" })
    );
    assert_eq!(data["category"], json!({ "id": category.id, "name": "Rice" }));
    assert_eq!(data["ingredients"][1]["item"], "saffron");

    let id = data["id"].as_str().expect("id").to_string();
    let response = app.server.get(&format!("/recipes/{}", id)).await;
    let detail = assert_success(&response, StatusCode::OK);
    assert_eq!(detail["steps"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_create_recipe_requires_login() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/recipes")
        .json(&recipe_body("Paella"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_recipe_for_someone_else_is_rejected() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;

    let mut body = recipe_body("Paella");
    body["author"] = json!(bruno.id());
    let response = app
        .server
        .post("/recipes")
        .authorization_bearer(&ana.token)
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_recipe_with_unknown_category() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let mut body = recipe_body("Paella");
    body["category"] = json!(Uuid::new_v4());
    let response = app
        .server
        .post("/recipes")
        .authorization_bearer(&ana.token)
        .json(&body)
        .await;
    assert_fail(
        &response,
        StatusCode::BAD_REQUEST,
        "The category does not exist",
    );
}

#[tokio::test]
async fn test_create_recipe_validation() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .post("/recipes")
        .authorization_bearer(&ana.token)
        .json(&json!({
            "title": "P",
            "readyInMinutes": -5,
            "servings": 2.5,
            "ingredients": [{ "item": "r", "measure": "1 cup" }],
            "steps": []
        }))
        .await;
    assert_invalid_field(&response, "title");
    assert_invalid_field(&response, "readyInMinutes");
    assert_invalid_field(&response, "servings");
    assert_invalid_field(&response, "ingredients[0].item");
    assert_invalid_field(&response, "steps");
}

#[tokio::test]
async fn test_patch_rejects_author_and_likes() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let recipe = app.seed_recipe(&ana, "Tortilla").await;

    let response = app
        .server
        .patch(&format!("/recipes/{}", recipe.id))
        .authorization_bearer(&ana.token)
        .json(&json!({ "likes": 100 }))
        .await;
    assert_invalid_field(&response, "likes");

    let response = app
        .server
        .patch(&format!("/recipes/{}", recipe.id))
        .authorization_bearer(&ana.token)
        .json(&json!({ "author": Uuid::new_v4() }))
        .await;
    assert_invalid_field(&response, "author");

    let stored = app.recipe(recipe.id).await;
    assert_eq!(stored.likes, 0);
    assert_eq!(stored.author, ana.id());
}

#[tokio::test]
async fn test_only_the_author_patches_and_deletes() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let recipe = app.seed_recipe(&ana, "Tortilla").await;
    let path = format!("/recipes/{}", recipe.id);

    let response = app
        .server
        .patch(&path)
        .authorization_bearer(&bruno.token)
        .json(&json!({ "title": "Stolen" }))
        .await;
    assert_fail(
        &response,
        StatusCode::UNAUTHORIZED,
        "You do not have permission to perform this operation",
    );

    let response = app
        .server
        .delete(&path)
        .authorization_bearer(&bruno.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .patch(&path)
        .authorization_bearer(&ana.token)
        .json(&json!({ "title": "Tortilla de patatas", "servings": 6 }))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data["title"], "Tortilla de patatas");
    assert_eq!(data["servings"], 6);
    assert_eq!(data["readyInMinutes"], 30);

    let response = app
        .server
        .delete(&path)
        .authorization_bearer(&ana.token)
        .await;
    assert_no_content(&response);

    let response = app.server.get(&path).await;
    assert_fail(&response, StatusCode::NOT_FOUND, "The recipe does not exist");
}

#[tokio::test]
async fn test_missing_recipe_on_patch_and_delete_is_400() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let path = format!("/recipes/{}", Uuid::new_v4());

    let response = app
        .server
        .patch(&path)
        .authorization_bearer(&ana.token)
        .json(&json!({ "title": "Anything" }))
        .await;
    assert_fail(&response, StatusCode::BAD_REQUEST, "The recipe does not exist");

    let response = app
        .server
        .delete(&path)
        .authorization_bearer(&ana.token)
        .await;
    assert_fail(&response, StatusCode::BAD_REQUEST, "The recipe does not exist");
}

#[tokio::test]
async fn test_list_recipes_filters() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let rice = app.seed_category("Rice").await;

    let mut paella = recipe_body("Paella Valenciana");
    paella["category"] = json!(rice.id);
    for (author, body) in [
        (&ana, paella),
        (&ana, recipe_body("Tortilla")),
        (&bruno, recipe_body("Paella negra")),
    ] {
        let response = app
            .server
            .post("/recipes")
            .authorization_bearer(&author.token)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = app.server.get("/recipes").await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(3));
    assert!(data[0].get("ingredients").is_none());
    assert!(data[0]["author"]["username"].is_string());

    let response = app
        .server
        .get("/recipes")
        .add_query_param("title", "PAELLA")
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(2));

    let response = app
        .server
        .get("/recipes")
        .add_query_param("title", "paella")
        .add_query_param("author", ana.id())
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(1));
    assert_eq!(data[0]["title"], "Paella Valenciana");

    let response = app
        .server
        .get("/recipes")
        .add_query_param("category", rice.id)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(1));
    assert_eq!(data[0]["category"]["name"], "Rice");

    let response = app
        .server
        .get("/recipes")
        .add_query_param("author", "not-a-uuid")
        .await;
    assert_invalid_field(&response, "author");
}
