//! Password hashing
//!
//! Thin wrappers over `bcrypt` so handlers pass the configured cost around
//! instead of hard-coding it.

use bcrypt::{hash, verify, BcryptError};

/// Hash a plain-text password with the given work factor
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Check a plain-text password against a stored hash
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            false
        }
    }
}
