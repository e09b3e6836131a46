//! Request Validation
//!
//! Field rules shared by every handler, plus a `Validator` that collects all
//! failures of a request so they can be reported together.
//!
//! Validator methods always return a value. When a rule fails the value is a
//! placeholder and the failure is recorded; callers must call
//! [`Validator::finish`] before using any returned value.
//!
//! ```rust
//! use recipebook::shared::validation::Validator;
//!
//! let mut v = Validator::new();
//! let username = v.username("username", "  Ana ");
//! let email = v.email("email", "not-an-email");
//! assert!(v.finish().is_err());
//! assert_eq!(username, "ana");
//! # let _ = email;
//! ```

use email_address::EmailAddress;
use regex::RegexBuilder;
use url::Url;
use uuid::Uuid;

use crate::shared::error::{FieldError, SharedError};
use crate::shared::models::TitlePattern;

pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 16;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const TITLE_MIN_LEN: usize = 2;
pub const CATEGORY_NAME_MIN_LEN: usize = 2;
pub const INGREDIENT_MIN_LEN: usize = 2;
pub const STEP_DESCRIPTION_MIN_LEN: usize = 10;
pub const TITLE_PATTERN_MAX_LEN: usize = 128;

/// Trim and lowercase a username, then check its length
pub fn normalize_username(raw: &str) -> Result<String, String> {
    let username = raw.trim().to_lowercase();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "must be between {} and {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        ));
    }
    Ok(username)
}

/// Trim and lowercase an email address, then check its format
pub fn normalize_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err("is required".to_string());
    }
    if !EmailAddress::is_valid(&email) {
        return Err("must be a valid email address".to_string());
    }
    Ok(email)
}

/// Strong password: length, one uppercase, one lowercase, one digit
pub fn check_password(raw: &str) -> Result<(), String> {
    let long_enough = raw.chars().count() >= PASSWORD_MIN_LEN;
    let upper = raw.chars().any(|c| c.is_uppercase());
    let lower = raw.chars().any(|c| c.is_lowercase());
    let digit = raw.chars().any(|c| c.is_ascii_digit());
    if long_enough && upper && lower && digit {
        Ok(())
    } else {
        Err(format!(
            "must have at least {} characters, one uppercase letter, one lowercase letter and one number",
            PASSWORD_MIN_LEN
        ))
    }
}

/// Parse a record identifier
pub fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| "must be a valid id".to_string())
}

/// Accept absolute http(s) URLs only
pub fn check_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err("must be an http(s) URL".to_string()),
    }
}

/// Collects field errors for one request
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn ensure(&mut self, condition: bool, field: &str, message: &str) {
        if !condition {
            self.reject(field, message);
        }
    }

    fn record<T>(&mut self, field: &str, result: Result<T, String>, placeholder: T) -> T {
        match result {
            Ok(value) => value,
            Err(message) => {
                self.reject(field, message);
                placeholder
            }
        }
    }

    pub fn username(&mut self, field: &str, raw: &str) -> String {
        let normalized = raw.trim().to_lowercase();
        self.record(field, normalize_username(raw), normalized)
    }

    pub fn email(&mut self, field: &str, raw: &str) -> String {
        self.record(field, normalize_email(raw), String::new())
    }

    pub fn password(&mut self, field: &str, raw: &str) {
        self.record(field, check_password(raw), ());
    }

    pub fn password_confirm(&mut self, field: &str, password: &str, confirm: &str) {
        self.ensure(password == confirm, field, "must match the password");
    }

    pub fn id(&mut self, field: &str, raw: &str) -> Uuid {
        self.record(field, parse_id(raw), Uuid::nil())
    }

    pub fn optional_id(&mut self, field: &str, raw: Option<&str>) -> Option<Uuid> {
        raw.map(|raw| self.id(field, raw))
    }

    pub fn optional_url(&mut self, field: &str, raw: Option<&str>) -> Option<String> {
        raw.map(|raw| self.record(field, check_url(raw), String::new()))
    }

    /// Trimmed text with a minimum length in characters
    pub fn text(&mut self, field: &str, raw: &str, min_len: usize) -> String {
        let trimmed = raw.trim().to_string();
        if trimmed.chars().count() < min_len {
            self.reject(field, format!("must have at least {} characters", min_len));
        }
        trimmed
    }

    /// Strictly positive whole number that fits an `i32`
    pub fn positive(&mut self, field: &str, value: f64) -> i32 {
        if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= i32::MAX as f64 {
            value as i32
        } else {
            self.reject(field, "must be a positive whole number");
            0
        }
    }

    /// Compile a case-insensitive title search pattern
    pub fn title_pattern(&mut self, field: &str, raw: &str) -> Option<TitlePattern> {
        let source = raw.trim();
        if source.is_empty() {
            return None;
        }
        if source.chars().count() > TITLE_PATTERN_MAX_LEN {
            self.reject(
                field,
                format!("must have at most {} characters", TITLE_PATTERN_MAX_LEN),
            );
            return None;
        }
        match RegexBuilder::new(source)
            .case_insensitive(true)
            .size_limit(1 << 20)
            .build()
        {
            Ok(regex) => Some(TitlePattern::new(source, regex)),
            Err(_) => {
                self.reject(field, "must be a valid search pattern");
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), SharedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SharedError::invalid(self.errors))
        }
    }
}
