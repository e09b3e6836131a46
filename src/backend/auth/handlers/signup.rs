/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email, password strength and confirmation
 * 2. Check that neither username nor email is taken
 * 3. Hash password using bcrypt
 * 4. Create user in the store
 * 5. Generate JWT token
 * 6. Return token and user info
 *
 * New accounts always get the `USER` role; administrators are created
 * through `POST /users`.
 */
use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::{create_token, AuthConfig};
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidJson;
use crate::backend::reply;
use crate::backend::store::Store;
use crate::backend::users::register;
use crate::backend::users::types::RegistrationInput;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Validation failure, or username/email already taken
/// * `500 Internal Server Error` - Hashing, store or token failure
///
/// # Example Request
///
/// ```http
/// POST /auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "ana",
///   "email": "ana@example.com",
///   "password": "Secret123",
///   "passwordConfirm": "Secret123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "status": "success",
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "user": { "id": "...", "username": "ana", "email": "ana@example.com", "role": "USER", ... }
///   }
/// }
/// ```
pub async fn signup(
    State(store): State<Arc<dyn Store>>,
    State(auth): State<Arc<AuthConfig>>,
    ValidJson(request): ValidJson<SignupRequest>,
) -> Result<Response, BackendError> {
    tracing::info!("Signup request for username: {}", request.username.trim());

    let registration = RegistrationInput {
        username: &request.username,
        email: &request.email,
        password: &request.password,
        password_confirm: &request.password_confirm,
        photo: request.photo.as_deref(),
        role: None,
    }
    .validate()?;

    let user = register(store.as_ref(), registration, auth.bcrypt_cost).await?;

    let token = create_token(&auth, &user).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal(e.to_string())
    })?;

    Ok(reply::ok(AuthResponse { token, user }))
}
