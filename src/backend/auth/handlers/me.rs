/**
 * Get Current User Handler
 *
 * GET /auth/me returns the user behind the bearer token. Token checks and
 * the store lookup happen in the [`AuthUser`] extractor.
 */
use axum::response::Response;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::reply;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing, invalid or expired token, or deleted user
pub async fn get_me(AuthUser(user): AuthUser) -> Result<Response, BackendError> {
    Ok(reply::ok(user))
}
