/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the only long-lived resource of the server. It is
 * built once at startup and cloned into every handler:
 * - `store` - The repository handle (PostgreSQL pool or in-memory store)
 * - `auth` - Token and password hashing settings
 *
 * # Thread Safety
 *
 * Both fields are `Arc`s over `Send + Sync` values, so cloning the state is
 * cheap and handlers never share mutable data outside the store.
 *
 * # Example
 *
 * ```rust
 * use std::sync::Arc;
 * use axum::extract::State;
 * use recipebook::backend::store::Store;
 *
 * async fn handler(State(store): State<Arc<dyn Store>>) {
 *     let users = store.list_users().await;
 *     // ...
 * }
 * ```
 */
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::AuthConfig;
use crate::backend::store::Store;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Repository over users, categories, recipes and edges
    pub store: Arc<dyn Store>,

    /// JWT and bcrypt settings
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }
}

/// Implement FromRef for the store handle
///
/// This allows handlers to extract `State<Arc<dyn Store>>` directly.
impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Implement FromRef for the auth settings
impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
