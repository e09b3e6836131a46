/**
 * User Request Types
 *
 * Bodies for the user-management endpoints plus [`RegistrationInput`], the
 * validation shared by signup and admin user creation.
 */
use serde::Deserialize;
use serde_json::Value;

use crate::shared::models::{Role, UserPatch};
use crate::shared::{SharedError, Validator};

/// Validated registration data, password still in plain text
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub photo: Option<String>,
}

/// Fields common to signup and admin user creation
pub struct RegistrationInput<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
    pub photo: Option<&'a str>,
    pub role: Option<&'a str>,
}

impl RegistrationInput<'_> {
    pub fn validate(&self) -> Result<Registration, SharedError> {
        let mut v = Validator::new();
        let username = v.username("username", self.username);
        let email = v.email("email", self.email);
        v.password("password", self.password);
        v.password_confirm("passwordConfirm", self.password, self.password_confirm);
        let photo = v.optional_url("photo", self.photo);
        let role = match self.role {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => role,
                Err(err) => {
                    v.reject("role", err.to_string());
                    Role::User
                }
            },
            None => Role::User,
        };
        v.finish()?;

        Ok(Registration {
            username,
            email,
            password: self.password.to_string(),
            role,
            photo,
        })
    }
}

/// Body of `POST /users` (admin only)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<Registration, SharedError> {
        RegistrationInput {
            username: &self.username,
            email: &self.email,
            password: &self.password,
            password_confirm: &self.password_confirm,
            photo: self.photo.as_deref(),
            role: self.role.as_deref(),
        }
        .validate()
    }
}

/// Body of `PATCH /users/{id}`
///
/// Passwords and counters are not editable here; their presence is a
/// validation failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub role: Option<String>,
    pub password: Option<Value>,
    pub followers: Option<Value>,
    pub following: Option<Value>,
    pub favourites: Option<Value>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<UserPatch, SharedError> {
        let mut v = Validator::new();
        v.ensure(self.password.is_none(), "password", "cannot be changed");
        v.ensure(self.followers.is_none(), "followers", "cannot be changed");
        v.ensure(self.following.is_none(), "following", "cannot be changed");
        v.ensure(self.favourites.is_none(), "favourites", "cannot be changed");

        let patch = UserPatch {
            username: self.username.as_deref().map(|u| v.username("username", u)),
            email: self.email.as_deref().map(|e| v.email("email", e)),
            photo: v.optional_url("photo", self.photo.as_deref()),
            role: self.role.as_deref().and_then(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    v.reject("role", err.to_string());
                    None
                }
            }),
        };
        v.finish()?;
        Ok(patch)
    }
}
