//! Recipes Module
//!
//! CRUD for recipes plus the lookups that replace stored author/category ids
//! with their summaries in responses.
//!
//! # Module Structure
//!
//! ```text
//! recipes/
//! ├── mod.rs       - Population helpers
//! ├── types.rs     - Request bodies and their validation
//! └── handlers.rs  - HTTP handlers
//! ```
//!
//! # Population
//!
//! Stored recipes reference their author and category by id. Responses carry
//! `{id, username, email}` for the author and `{id, name}` (or null) for the
//! category. [`populate_summaries`] resolves a whole page with one user
//! lookup and at most one category lookup.

use std::collections::HashMap;

use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::models::{Category, Recipe, RecipeDetail, RecipeSummary, UserSummary};

/// Request bodies and validation
pub mod types;

/// HTTP handlers
pub mod handlers;

async fn lookups(
    store: &dyn Store,
    recipes: &[Recipe],
) -> Result<(HashMap<Uuid, UserSummary>, HashMap<Uuid, Category>), StoreError> {
    let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author).collect();
    author_ids.sort();
    author_ids.dedup();

    let authors = store
        .list_users_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.summary()))
        .collect();

    let categories = if recipes.iter().any(|r| r.category.is_some()) {
        store
            .list_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    } else {
        HashMap::new()
    };

    Ok((authors, categories))
}

/// Resolve authors and categories for a list of recipes
pub async fn populate_summaries(
    store: &dyn Store,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeSummary>, StoreError> {
    let (authors, categories) = lookups(store, &recipes).await?;
    Ok(recipes
        .into_iter()
        .map(|recipe| {
            let author = authors.get(&recipe.author).cloned();
            let category = recipe.category.and_then(|c| categories.get(&c).cloned());
            RecipeSummary::from_parts(recipe, author, category)
        })
        .collect())
}

/// Resolve author and category for a single recipe
pub async fn populate_detail(store: &dyn Store, recipe: Recipe) -> Result<RecipeDetail, StoreError> {
    let author = store.find_user(recipe.author).await?.map(|u| u.summary());
    let category = match recipe.category {
        Some(id) => store.find_category(id).await?,
        None => None,
    };
    Ok(RecipeDetail::from_parts(recipe, author, category))
}
