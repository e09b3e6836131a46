//! Users Module
//!
//! User profiles: listing, admin creation, self-service updates and
//! cascading deletion. Signup lives in `auth` but registers accounts through
//! [`register`] here so both paths apply the same checks.
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs       - Shared registration and uniqueness checks
//! ├── types.rs     - Request bodies and validation
//! └── handlers.rs  - HTTP handlers
//! ```

use uuid::Uuid;

use crate::backend::auth::passwords::hash_password;
use crate::backend::error::BackendError;
use crate::backend::store::Store;
use crate::shared::models::{NewUser, User};

/// Request bodies and validation
pub mod types;

/// HTTP handlers
pub mod handlers;

use types::Registration;

pub const USERNAME_TAKEN: &str = "The username already exists, please try another one";
pub const EMAIL_TAKEN: &str = "The email already exists, please try another one";

/// Reject a username or email already held by a user other than `except`
pub async fn ensure_unique(
    store: &dyn Store,
    username: Option<&str>,
    email: Option<&str>,
    except: Option<Uuid>,
) -> Result<(), BackendError> {
    let held_by_other = |user: Option<User>| user.is_some_and(|u| Some(u.id) != except);

    if let Some(username) = username {
        if held_by_other(store.find_user_by_username(username).await?) {
            tracing::warn!("Username already exists: {}", username);
            return Err(BackendError::bad_request(USERNAME_TAKEN));
        }
    }
    if let Some(email) = email {
        if held_by_other(store.find_user_by_email(email).await?) {
            tracing::warn!("Email already exists: {}", email);
            return Err(BackendError::bad_request(EMAIL_TAKEN));
        }
    }
    Ok(())
}

/// Check uniqueness, hash the password and store the new account
pub async fn register(
    store: &dyn Store,
    registration: Registration,
    bcrypt_cost: u32,
) -> Result<User, BackendError> {
    ensure_unique(
        store,
        Some(&registration.username),
        Some(&registration.email),
        None,
    )
    .await?;

    let password_hash = hash_password(&registration.password, bcrypt_cost)?;
    let user = store
        .insert_user(NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
            role: registration.role,
            photo: registration.photo,
        })
        .await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);
    Ok(user)
}
