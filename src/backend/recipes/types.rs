/**
 * Recipe Request Types
 *
 * Bodies accepted by `POST /recipes` and `PATCH /recipes/{id}`, each with a
 * `validate` method that collects every field failure before anything
 * touches the store.
 */
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::shared::models::{Ingredient, RecipeFilter, RecipePatch, Step};
use crate::shared::validation::{
    INGREDIENT_MIN_LEN, STEP_DESCRIPTION_MIN_LEN, TITLE_MIN_LEN,
};
use crate::shared::{SharedError, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientInput {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub measure: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepInput {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Body of `POST /recipes`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<f64>,
    #[serde(default)]
    pub servings: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
    /// Optional; must name the caller when present
    #[serde(default)]
    pub author: Option<String>,
}

/// Validated `POST /recipes` body, still missing its author
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub picture: Option<String>,
    pub ready_in_minutes: i32,
    pub servings: i32,
    pub category: Option<Uuid>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub author: Option<Uuid>,
}

/// Body of `PATCH /recipes/{id}`
///
/// `author` and `likes` are accepted by the parser only so their presence
/// can be reported as a validation failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub picture: Option<String>,
    pub ready_in_minutes: Option<f64>,
    pub servings: Option<f64>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub steps: Option<Vec<StepInput>>,
    pub author: Option<Value>,
    pub likes: Option<Value>,
}

/// Query of `GET /recipes`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub title: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
}

fn required_positive(v: &mut Validator, field: &str, value: Option<f64>) -> i32 {
    match value {
        Some(value) => v.positive(field, value),
        None => {
            v.reject(field, "is required");
            0
        }
    }
}

fn tags(v: &mut Validator, raw: &[String]) -> Vec<String> {
    raw.iter()
        .enumerate()
        .map(|(i, tag)| v.text(&format!("tags[{}]", i), tag, 1))
        .collect()
}

fn ingredients(v: &mut Validator, raw: &[IngredientInput]) -> Vec<Ingredient> {
    v.ensure(!raw.is_empty(), "ingredients", "must have at least one ingredient");
    raw.iter()
        .enumerate()
        .map(|(i, input)| Ingredient {
            item: v.text(&format!("ingredients[{}].item", i), &input.item, INGREDIENT_MIN_LEN),
            measure: v.text(
                &format!("ingredients[{}].measure", i),
                &input.measure,
                INGREDIENT_MIN_LEN,
            ),
        })
        .collect()
}

fn steps(v: &mut Validator, raw: &[StepInput]) -> Vec<Step> {
    v.ensure(!raw.is_empty(), "steps", "must have at least one step");
    raw.iter()
        .enumerate()
        .map(|(i, input)| Step {
            description: v.text(
                &format!("steps[{}].description", i),
                &input.description,
                STEP_DESCRIPTION_MIN_LEN,
            ),
            picture: v.optional_url(&format!("steps[{}].picture", i), input.picture.as_deref()),
        })
        .collect()
}

impl CreateRecipeRequest {
    pub fn validate(&self) -> Result<RecipeDraft, SharedError> {
        let mut v = Validator::new();
        let draft = RecipeDraft {
            title: v.text("title", &self.title, TITLE_MIN_LEN),
            picture: v.optional_url("picture", self.picture.as_deref()),
            ready_in_minutes: required_positive(&mut v, "readyInMinutes", self.ready_in_minutes),
            servings: required_positive(&mut v, "servings", self.servings),
            category: v.optional_id("category", self.category.as_deref()),
            tags: tags(&mut v, &self.tags),
            ingredients: ingredients(&mut v, &self.ingredients),
            steps: steps(&mut v, &self.steps),
            author: v.optional_id("author", self.author.as_deref()),
        };
        v.finish()?;
        Ok(draft)
    }
}

impl UpdateRecipeRequest {
    pub fn validate(&self) -> Result<RecipePatch, SharedError> {
        let mut v = Validator::new();
        v.ensure(self.author.is_none(), "author", "cannot be changed");
        v.ensure(self.likes.is_none(), "likes", "cannot be changed");

        let patch = RecipePatch {
            title: self
                .title
                .as_deref()
                .map(|t| v.text("title", t, TITLE_MIN_LEN)),
            picture: v.optional_url("picture", self.picture.as_deref()),
            ready_in_minutes: self
                .ready_in_minutes
                .map(|n| v.positive("readyInMinutes", n)),
            servings: self.servings.map(|n| v.positive("servings", n)),
            category: v.optional_id("category", self.category.as_deref()),
            tags: self.tags.as_deref().map(|t| tags(&mut v, t)),
            ingredients: self.ingredients.as_deref().map(|i| ingredients(&mut v, i)),
            steps: self.steps.as_deref().map(|s| steps(&mut v, s)),
        };
        v.finish()?;
        Ok(patch)
    }
}

impl RecipeQuery {
    pub fn validate(&self) -> Result<RecipeFilter, SharedError> {
        let mut v = Validator::new();
        let filter = RecipeFilter {
            title: self
                .title
                .as_deref()
                .and_then(|t| v.title_pattern("title", t)),
            category: v.optional_id("category", self.category.as_deref()),
            author: v.optional_id("author", self.author.as_deref()),
        };
        v.finish()?;
        Ok(filter)
    }
}
