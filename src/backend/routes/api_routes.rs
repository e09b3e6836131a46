/**
 * API Route Tables
 *
 * Each `configure_*` function adds one resource's routes to the router.
 * Authentication is enforced by the handlers' extractors (`AuthUser`,
 * `AdminUser`), so the tables only map paths to handlers.
 *
 * # Authentication
 *
 * Public: signup, login and every `GET` except `/auth/me` and `/likes`.
 * Everything else needs a bearer token; `POST /users`, `POST /categories`
 * and `DELETE /categories/{id}` need an administrator.
 */
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::server::state::AppState;
use crate::backend::{categories, recipes, social, users};

/// `/auth/*`
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

/// `/users` and `/users/{id}`, plus the per-user edge views
pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/users",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(users::handlers::get_user)
                .patch(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        .route(
            "/users/{id}/followings",
            get(social::handlers::list_followings).post(social::handlers::add_following),
        )
        .route(
            "/users/{id}/followings/{target_id}",
            delete(social::handlers::remove_following),
        )
        .route(
            "/users/{id}/followers",
            get(social::handlers::list_followers),
        )
        .route(
            "/users/{id}/likes",
            get(social::handlers::list_user_likes).post(social::handlers::add_user_like),
        )
        .route(
            "/users/{id}/likes/{recipe_id}",
            delete(social::handlers::remove_user_like),
        )
}

/// `/follows` and `/likes`
pub fn configure_edge_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/follows",
            get(social::handlers::list_follows)
                .post(social::handlers::create_follow)
                .delete(social::handlers::delete_follow),
        )
        .route(
            "/likes",
            get(social::handlers::list_likes)
                .post(social::handlers::create_like)
                .delete(social::handlers::delete_like),
        )
}

/// `/categories` and `/categories/{id}`
pub fn configure_category_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category).delete(categories::delete_category),
        )
}

/// `/recipes` and `/recipes/{id}`
pub fn configure_recipe_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/recipes",
            get(recipes::handlers::list_recipes).post(recipes::handlers::create_recipe),
        )
        .route(
            "/recipes/{id}",
            get(recipes::handlers::get_recipe)
                .patch(recipes::handlers::update_recipe)
                .delete(recipes::handlers::delete_recipe),
        )
}
