/**
 * User Handlers
 *
 * - `GET /users` - All users
 * - `GET /users/{id}` - One user, 404 when missing
 * - `POST /users` - Admin creates an account, optionally with a role
 * - `PATCH /users/{id}` - The user or an admin edits the profile; only
 *   admins may change `role`
 * - `DELETE /users/{id}` - The user or an admin removes the account with
 *   its edges and recipes
 *
 * Follow and like listings under `/users/{id}` live in the social module.
 */
use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::backend::auth::sessions::AuthConfig;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::NOT_PERMITTED;
use crate::backend::middleware::{AdminUser, AuthUser, ValidId, ValidJson};
use crate::backend::reply;
use crate::backend::social::{service, SocialError};
use crate::backend::store::Store;
use crate::backend::users::types::{CreateUserRequest, UpdateUserRequest};
use crate::backend::users::{ensure_unique, register};

/// GET /users
pub async fn list_users(State(store): State<Arc<dyn Store>>) -> Result<Response, BackendError> {
    Ok(reply::ok(store.list_users().await?))
}

/// GET /users/{id}
pub async fn get_user(
    State(store): State<Arc<dyn Store>>,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    let user = store
        .find_user(id)
        .await?
        .ok_or_else(|| BackendError::not_found("The user does not exist"))?;
    Ok(reply::ok(user))
}

/// POST /users
pub async fn create_user(
    State(store): State<Arc<dyn Store>>,
    State(auth): State<Arc<AuthConfig>>,
    AdminUser(admin): AdminUser,
    ValidJson(request): ValidJson<CreateUserRequest>,
) -> Result<Response, BackendError> {
    let registration = request.validate()?;
    let user = register(store.as_ref(), registration, auth.bcrypt_cost).await?;
    tracing::info!(user = %user.id, admin = %admin.id, "User created by admin");
    Ok(reply::created(user))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidId(id): ValidId,
    ValidJson(request): ValidJson<UpdateUserRequest>,
) -> Result<Response, BackendError> {
    if actor.id != id && !actor.is_admin() {
        return Err(SocialError::Forbidden.into());
    }

    let patch = request.validate()?;
    if patch.role.is_some() && !actor.is_admin() {
        return Err(BackendError::unauthorized(NOT_PERMITTED));
    }

    ensure_unique(
        store.as_ref(),
        patch.username.as_deref(),
        patch.email.as_deref(),
        Some(id),
    )
    .await?;

    let user = store
        .update_user(id, &patch)
        .await?
        .ok_or_else(|| BackendError::bad_request("The user does not exist"))?;

    tracing::info!(user = %id, actor = %actor.id, "User updated");
    Ok(reply::ok(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    service::delete_user(store.as_ref(), &actor, id).await?;
    Ok(reply::no_content())
}
