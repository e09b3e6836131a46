/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across signup, login, and get_me handlers.
 *
 * Missing string fields deserialize as empty strings so they surface as
 * itemized validation errors instead of a body parse failure.
 */
use serde::{Deserialize, Serialize};

use crate::shared::models::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Chosen username (2-16 chars after trimming, stored lower-case)
    #[serde(default)]
    pub username: String,
    /// Email address (stored lower-case)
    #[serde(default)]
    pub email: String,
    /// Plain-text password (hashed before storage)
    #[serde(default)]
    pub password: String,
    /// Must equal `password`
    #[serde(default)]
    pub password_confirm: String,
    /// Optional profile photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login handlers as the envelope's `data`.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    /// Bearer token
    pub token: String,
    /// The authenticated user (never includes the password hash)
    pub user: User,
}
