//! HTTP integration tests
//!
//! One module per resource; each test builds its own `TestApp`.

mod auth_test;
mod categories_test;
mod likes_test;
mod recipes_test;
mod users_test;
