//! Like API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use recipebook::shared::models::Role;

use crate::common::*;

#[tokio::test]
async fn test_like_then_unlike_restores_counters() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let recipe = app.seed_recipe(&bruno, "Tortilla").await;

    let response = app
        .server
        .post("/likes")
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": recipe.id }))
        .await;
    let data = assert_success(&response, StatusCode::CREATED);
    assert_eq!(data["authorUser"], ana.id().to_string());
    assert_eq!(data["targetRecipe"], recipe.id.to_string());

    assert_eq!(app.recipe(recipe.id).await.likes, 1);
    assert_eq!(app.counters(ana.id()).await, (0, 0, 1));

    let response = app
        .server
        .delete("/likes")
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": recipe.id }))
        .await;
    assert_no_content(&response);

    assert_eq!(app.recipe(recipe.id).await.likes, 0);
    assert_eq!(app.counters(ana.id()).await, (0, 0, 0));
}

#[tokio::test]
async fn test_liking_twice_counts_once() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let recipe = app.seed_recipe(&ana, "Tortilla").await;
    let path = format!("/users/{}/likes", ana.id());

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": recipe.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": recipe.id }))
        .await;
    assert_fail(&response, StatusCode::BAD_REQUEST, "The operation is not valid");

    assert_eq!(app.recipe(recipe.id).await.likes, 1);
    assert_eq!(app.counters(ana.id()).await, (0, 0, 1));
}

#[tokio::test]
async fn test_unlike_without_like_is_rejected() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let recipe = app.seed_recipe(&ana, "Tortilla").await;

    let response = app
        .server
        .delete(&format!("/users/{}/likes/{}", ana.id(), recipe.id))
        .authorization_bearer(&ana.token)
        .await;
    assert_fail(
        &response,
        StatusCode::BAD_REQUEST,
        "Operation could not be completed",
    );
    assert_eq!(app.recipe(recipe.id).await.likes, 0);
}

#[tokio::test]
async fn test_like_missing_recipe() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;

    let response = app
        .server
        .post("/likes")
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": Uuid::new_v4() }))
        .await;
    assert_fail(&response, StatusCode::BAD_REQUEST, "The recipe does not exist");
    assert_eq!(app.counters(ana.id()).await, (0, 0, 0));
}

#[tokio::test]
async fn test_like_for_another_user_is_rejected() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let recipe = app.seed_recipe(&ana, "Tortilla").await;

    let response = app
        .server
        .post(&format!("/users/{}/likes", bruno.id()))
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": recipe.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.recipe(recipe.id).await.likes, 0);
}

#[tokio::test]
async fn test_like_lists() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let tortilla = app.seed_recipe(&bruno, "Tortilla").await;
    let gazpacho = app.seed_recipe(&bruno, "Gazpacho").await;

    for recipe in [&gazpacho, &tortilla] {
        let response = app
            .server
            .post("/likes")
            .authorization_bearer(&ana.token)
            .json(&json!({ "targetRecipe": recipe.id }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = app.server.get("/likes").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/likes")
        .authorization_bearer(&ana.token)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data.as_array().map(Vec::len), Some(2));

    let response = app
        .server
        .get("/likes")
        .authorization_bearer(&bruno.token)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data, json!([]));

    let response = app
        .server
        .get(&format!("/users/{}/likes", ana.id()))
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data[0]["title"], "Gazpacho");
    assert_eq!(data[1]["title"], "Tortilla");
    assert_eq!(data[0]["author"]["username"], "bruno");
    assert_eq!(data[0]["likes"], 1);
}

#[tokio::test]
async fn test_deleting_a_liked_recipe_gives_back_favourites() {
    let app = TestApp::new();
    let ana = app.seed_user("ana", Role::User).await;
    let bruno = app.seed_user("bruno", Role::User).await;
    let recipe = app.seed_recipe(&bruno, "Tortilla").await;

    let response = app
        .server
        .post("/likes")
        .authorization_bearer(&ana.token)
        .json(&json!({ "targetRecipe": recipe.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(app.counters(ana.id()).await, (0, 0, 1));

    let response = app
        .server
        .delete(&format!("/recipes/{}", recipe.id))
        .authorization_bearer(&bruno.token)
        .await;
    assert_no_content(&response);

    assert_eq!(app.counters(ana.id()).await, (0, 0, 0));
    let response = app
        .server
        .get("/likes")
        .authorization_bearer(&ana.token)
        .await;
    let data = assert_success(&response, StatusCode::OK);
    assert_eq!(data, json!([]));
}
