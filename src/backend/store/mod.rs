//! Store Module
//!
//! Typed repository interface over the document collections (users,
//! categories, recipes, follows, likes) and the unit-of-work primitive used for
//! paired writes.
//!
//! # Architecture
//!
//! - **`Store`** - Single-statement reads and writes. Each call is atomic on its own.
//! - **`UnitOfWork`** - One store transaction. Obtained from [`Store::begin`],
//!   finished with [`UnitOfWork::commit`]. Dropping it without committing
//!   discards every write made through it.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs       - Traits and StoreError
//! ├── postgres.rs  - PgStore (sqlx, one Transaction per unit of work)
//! └── memory.rs    - MemoryStore (write lock + staged copy per unit of work)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use recipebook::backend::store::{MemoryStore, Store};
//! use recipebook::shared::models::CounterDelta;
//! # async fn example(user_id: uuid::Uuid) -> Result<(), recipebook::backend::store::StoreError> {
//! let store = MemoryStore::new();
//! let mut uow = store.begin().await?;
//! uow.adjust_user_counters(user_id, CounterDelta::followers(1)).await?;
//! uow.commit().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::models::{
    Category, CounterDelta, Follow, FollowFilter, Like, LikeFilter, NewRecipe, NewUser, Recipe,
    RecipeFilter, RecipePatch, User, UserPatch,
};

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the database driver
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// A unique constraint rejected the write
    #[error("duplicate record violates '{constraint}'")]
    Duplicate {
        /// Name of the violated constraint
        constraint: String,
    },

    /// A check constraint rejected the write
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The database rejected a search pattern the validator accepted
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),

    /// A stored record could not be decoded
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// SQLSTATE for `invalid_regular_expression`
const INVALID_REGULAR_EXPRESSION: &str = "2201B";

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if db.is_unique_violation() {
                return Self::Duplicate {
                    constraint: db.constraint().unwrap_or("unique").to_string(),
                };
            }
            if db.is_check_violation() {
                return Self::Constraint(db.constraint().unwrap_or("check").to_string());
            }
            if db.code().as_deref() == Some(INVALID_REGULAR_EXPRESSION) {
                return Self::InvalidPattern(db.message().to_string());
            }
        }
        Self::Sqlx(err)
    }
}

/// Repository over all collections
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn list_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError>;
    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, StoreError>;

    async fn insert_category(&self, name: String) -> Result<Category, StoreError>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StoreError>;
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    /// Removes the category and detaches it from every recipe
    async fn delete_category(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;
    async fn find_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;
    async fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError>;
    async fn list_recipes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError>;
    async fn update_recipe(
        &self,
        id: Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, StoreError>;

    async fn list_follows(&self, filter: FollowFilter) -> Result<Vec<Follow>, StoreError>;
    async fn list_likes(&self, filter: LikeFilter) -> Result<Vec<Like>, StoreError>;

    /// Start a unit of work
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError>;
}

/// Writes that must commit or abort together
#[async_trait]
pub trait UnitOfWork: Send {
    /// Lock the given users for update in id order and return the ids found
    ///
    /// Callers lock every user whose counters they will touch before any
    /// other write, so concurrent units acquire user rows in one order.
    async fn lock_users(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, StoreError>;
    async fn find_recipe(&mut self, id: Uuid) -> Result<Option<Recipe>, StoreError>;

    async fn find_follow(&mut self, author: Uuid, target: Uuid)
        -> Result<Option<Follow>, StoreError>;
    async fn insert_follow(&mut self, follow: &Follow) -> Result<(), StoreError>;
    async fn delete_follow(&mut self, author: Uuid, target: Uuid) -> Result<bool, StoreError>;
    /// Removes every follow where `user` is author or target
    async fn delete_follows_involving(&mut self, user: Uuid) -> Result<Vec<Follow>, StoreError>;

    async fn find_like(&mut self, author: Uuid, recipe: Uuid) -> Result<Option<Like>, StoreError>;
    async fn insert_like(&mut self, like: &Like) -> Result<(), StoreError>;
    async fn delete_like(&mut self, author: Uuid, recipe: Uuid) -> Result<bool, StoreError>;
    async fn delete_likes_by_user(&mut self, user: Uuid) -> Result<Vec<Like>, StoreError>;
    async fn delete_likes_on_recipe(&mut self, recipe: Uuid) -> Result<Vec<Like>, StoreError>;

    async fn adjust_user_counters(&mut self, id: Uuid, delta: CounterDelta)
        -> Result<(), StoreError>;
    async fn adjust_recipe_likes(&mut self, id: Uuid, delta: i64) -> Result<(), StoreError>;

    async fn recipes_by_author(&mut self, author: Uuid) -> Result<Vec<Uuid>, StoreError>;
    async fn delete_recipe(&mut self, id: Uuid) -> Result<bool, StoreError>;
    async fn delete_user(&mut self, id: Uuid) -> Result<bool, StoreError>;

    /// Make every write of this unit visible at once
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
