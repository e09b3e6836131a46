//! Test application and fixtures
//!
//! Users are inserted straight into the store so tests can create
//! administrators and skip the signup round trip; each fixture user gets a
//! freshly signed token.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use recipebook::backend::auth::passwords::hash_password;
use recipebook::backend::auth::sessions::{create_token, AuthConfig};
use recipebook::backend::routes::create_router;
use recipebook::backend::server::AppState;
use recipebook::backend::store::{MemoryStore, Store};
use recipebook::shared::models::{
    Category, Ingredient, NewRecipe, NewUser, Recipe, Role, Step, User,
};

/// Password shared by every fixture user
pub const TEST_PASSWORD: &str = "Secret123";

/// Lowest cost bcrypt accepts; keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// A fixture user and a valid token for it
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

/// The router under test plus direct access to its store
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub auth: AuthConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            token_ttl_secs: 3600,
            bcrypt_cost: TEST_BCRYPT_COST,
        };
        let state = AppState::new(store.clone(), auth.clone());
        let server = TestServer::new(create_router(state)).expect("Failed to start test server");
        Self {
            server,
            store,
            auth,
        }
    }

    /// Insert a user with `TEST_PASSWORD` and sign a token for it
    pub async fn seed_user(&self, username: &str, role: Role) -> TestUser {
        let password_hash =
            hash_password(TEST_PASSWORD, TEST_BCRYPT_COST).expect("Failed to hash password");
        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash,
                role,
                photo: None,
            })
            .await
            .expect("Failed to insert user");
        let token = create_token(&self.auth, &user).expect("Failed to create test token");
        TestUser { user, token }
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        self.store
            .insert_category(name.to_string())
            .await
            .expect("Failed to insert category")
    }

    pub async fn seed_recipe(&self, author: &TestUser, title: &str) -> Recipe {
        self.store
            .insert_recipe(NewRecipe {
                title: title.to_string(),
                picture: None,
                ready_in_minutes: 30,
                servings: 2,
                category: None,
                tags: vec!["dinner".to_string()],
                author: author.id(),
                ingredients: vec![Ingredient {
                    item: "rice".to_string(),
                    measure: "200g".to_string(),
                }],
                steps: vec![Step {
                    description: "Boil the rice for twenty minutes".to_string(),
                    picture: None,
                }],
            })
            .await
            .expect("Failed to insert recipe")
    }

    /// Current state of a user, straight from the store
    pub async fn user(&self, id: Uuid) -> User {
        self.store
            .find_user(id)
            .await
            .expect("Store lookup failed")
            .expect("User does not exist")
    }

    pub async fn recipe(&self, id: Uuid) -> Recipe {
        self.store
            .find_recipe(id)
            .await
            .expect("Store lookup failed")
            .expect("Recipe does not exist")
    }

    /// `(followers, following, favourites)` of a user
    pub async fn counters(&self, id: Uuid) -> (i64, i64, i64) {
        let user = self.user(id).await;
        (user.followers, user.following, user.favourites)
    }
}

/// A `POST /recipes` body that passes validation
pub fn recipe_body(title: &str) -> Value {
    json!({
        "title": title,
        "readyInMinutes": 45,
        "servings": 4,
        "tags": ["spanish", "rice"],
        "ingredients": [
            { "item": "bomba rice", "measure": "300g" },
            { "item": "saffron", "measure": "a pinch" }
        ],
        "steps": [
            { "description": "Toast the rice in olive oil" },
            { "description": "Add the stock and simmer without stirring" }
        ]
    })
}
