//! Common test utilities and helpers
//!
//! - A `TestApp` wrapping the router in an `axum_test::TestServer`
//! - Fixtures for users, categories and recipes
//! - Assertions over the response envelope

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;

pub use assertions::*;
pub use auth_helpers::*;
