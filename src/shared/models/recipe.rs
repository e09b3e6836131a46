//! Recipe Data Structures
//!
//! A recipe stores references (`author`, `category`) as ids. The populated
//! views (`RecipeSummary`, `RecipeDetail`) are assembled by explicit lookups in
//! the backend, never by the store.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use super::user::UserSummary;

/// One ingredient line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub item: String,
    pub measure: String,
}

/// One preparation step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// A stored recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub picture: Option<String>,
    pub ready_in_minutes: i32,
    pub servings: i32,
    pub category: Option<Uuid>,
    pub tags: Vec<String>,
    pub author: Uuid,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub picture: Option<String>,
    pub ready_in_minutes: i32,
    pub servings: i32,
    pub category: Option<Uuid>,
    pub tags: Vec<String>,
    pub author: Uuid,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

impl NewRecipe {
    pub fn into_recipe(self) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: self.title,
            picture: self.picture,
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            category: self.category,
            tags: self.tags,
            author: self.author,
            ingredients: self.ingredients,
            steps: self.steps,
            likes: 0,
            created_at: Utc::now(),
        }
    }
}

/// Validated partial update for a recipe
///
/// There is deliberately no way to express a change of `author` or `likes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub picture: Option<String>,
    pub ready_in_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub category: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub steps: Option<Vec<Step>>,
}

impl RecipePatch {
    pub fn apply(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title = title.clone();
        }
        if let Some(picture) = &self.picture {
            recipe.picture = Some(picture.clone());
        }
        if let Some(minutes) = self.ready_in_minutes {
            recipe.ready_in_minutes = minutes;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(category) = self.category {
            recipe.category = Some(category);
        }
        if let Some(tags) = &self.tags {
            recipe.tags = tags.clone();
        }
        if let Some(ingredients) = &self.ingredients {
            recipe.ingredients = ingredients.clone();
        }
        if let Some(steps) = &self.steps {
            recipe.steps = steps.clone();
        }
    }
}

/// Case-insensitive title search pattern
///
/// Keeps the source text so SQL backends can hand it to their own regex
/// operator.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    source: String,
    regex: Regex,
}

impl TitlePattern {
    pub fn new(source: impl Into<String>, regex: Regex) -> Self {
        Self {
            source: source.into(),
            regex,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

/// Listing filter for recipes; every present criterion must match
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub title: Option<TitlePattern>,
    pub category: Option<Uuid>,
    pub author: Option<Uuid>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.title.as_ref().is_none_or(|p| p.is_match(&recipe.title))
            && self.category.is_none_or(|c| recipe.category == Some(c))
            && self.author.is_none_or(|a| recipe.author == a)
    }
}

/// Listing projection with populated references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub picture: Option<String>,
    pub category: Option<Category>,
    pub ready_in_minutes: i32,
    pub servings: i32,
    pub author: Option<UserSummary>,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// Full recipe with populated references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: Uuid,
    pub title: String,
    pub picture: Option<String>,
    pub ready_in_minutes: i32,
    pub servings: i32,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    pub author: Option<UserSummary>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl RecipeSummary {
    pub fn from_parts(
        recipe: Recipe,
        author: Option<UserSummary>,
        category: Option<Category>,
    ) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            picture: recipe.picture,
            category,
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            author,
            likes: recipe.likes,
            created_at: recipe.created_at,
        }
    }
}

impl RecipeDetail {
    pub fn from_parts(
        recipe: Recipe,
        author: Option<UserSummary>,
        category: Option<Category>,
    ) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            picture: recipe.picture,
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            category,
            tags: recipe.tags,
            author,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            likes: recipe.likes,
            created_at: recipe.created_at,
        }
    }
}
