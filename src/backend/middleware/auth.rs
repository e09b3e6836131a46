/**
 * Authentication Extractors
 *
 * Routes that require a logged-in user take an [`AuthUser`] argument; routes
 * restricted to administrators take an [`AdminUser`]. Both read the
 * `Authorization: Bearer <token>` header, verify the token and re-load the
 * user from the store, so a deleted account stops working immediately.
 *
 * Every failure is a 401 with an enveloped `fail` body.
 */
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::models::User;

pub const NOT_LOGGED_IN: &str = "You are not logged in, please try again";
pub const USER_GONE: &str = "The user no longer exists";
pub const NOT_PERMITTED: &str = "You do not have permission to access the requested resource";

/// Pull the bearer token out of the request headers
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the user behind a request
///
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies signature and expiry
/// 3. Re-loads the user the token names
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, BackendError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::debug!("Missing or malformed Authorization header");
        BackendError::unauthorized(NOT_LOGGED_IN)
    })?;

    let claims = verify_token(&state.auth, token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        BackendError::unauthorized(NOT_LOGGED_IN)
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| BackendError::unauthorized(NOT_LOGGED_IN))?;

    state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%user_id, "Token names a user that no longer exists");
            BackendError::unauthorized(USER_GONE)
        })
}

/// Axum extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await.map(AuthUser)
    }
}

/// Axum extractor for an authenticated administrator
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(state, &parts.headers).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "Non-admin tried an admin route");
            return Err(BackendError::unauthorized(NOT_PERMITTED));
        }
        Ok(AdminUser(user))
    }
}
