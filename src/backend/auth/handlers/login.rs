/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Validate the email format and that a password was sent
 * 2. Look up the user by (normalized) email
 * 3. Verify the password against the stored bcrypt hash
 * 4. Generate JWT token
 * 5. Return token and user info
 *
 * An unknown email and a wrong password produce the same 401, so the
 * response does not reveal which accounts exist.
 */
use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::sessions::{create_token, AuthConfig};
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidJson;
use crate::backend::reply;
use crate::backend::store::Store;
use crate::shared::Validator;

pub const BAD_CREDENTIALS: &str = "The email or password is incorrect, please try again";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Malformed email or empty password
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Store or token failure
pub async fn login(
    State(store): State<Arc<dyn Store>>,
    State(auth): State<Arc<AuthConfig>>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Response, BackendError> {
    let mut v = Validator::new();
    let email = v.email("email", &request.email);
    v.ensure(!request.password.is_empty(), "password", "is required");
    v.finish()?;

    let Some(user) = store.find_user_by_email(&email).await? else {
        tracing::warn!("Login attempt for unknown email: {}", email);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    };

    if !verify_password(&request.password, &user.password_hash) {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    }

    let token = create_token(&auth, &user).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal(e.to_string())
    })?;

    tracing::info!("User logged in: {}", user.username);
    Ok(reply::ok(AuthResponse { token, user }))
}
