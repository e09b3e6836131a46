/**
 * Recipe Handlers
 *
 * - `GET /recipes` - Filtered list of populated summaries
 * - `GET /recipes/{id}` - Populated detail, 404 when missing
 * - `POST /recipes` - Create; the caller becomes the author
 * - `PATCH /recipes/{id}` - Author-only partial update
 * - `DELETE /recipes/{id}` - Author-only delete, removes the recipe's likes
 */
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Response,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidId, ValidJson};
use crate::backend::recipes::types::{CreateRecipeRequest, RecipeQuery, UpdateRecipeRequest};
use crate::backend::recipes::{populate_detail, populate_summaries};
use crate::backend::reply;
use crate::backend::social::service;
use crate::backend::social::SocialError;
use crate::backend::store::Store;
use crate::shared::models::NewRecipe;

const RECIPE_MISSING: &str = "The recipe does not exist";
const CATEGORY_MISSING: &str = "The category does not exist";

async fn require_category(store: &dyn Store, category: Option<Uuid>) -> Result<(), BackendError> {
    if let Some(id) = category {
        if store.find_category(id).await?.is_none() {
            return Err(BackendError::bad_request(CATEGORY_MISSING));
        }
    }
    Ok(())
}

/// GET /recipes?title&category&author
pub async fn list_recipes(
    State(store): State<Arc<dyn Store>>,
    Query(query): Query<RecipeQuery>,
) -> Result<Response, BackendError> {
    let filter = query.validate()?;
    let recipes = store.list_recipes(&filter).await?;
    let summaries = populate_summaries(store.as_ref(), recipes).await?;
    Ok(reply::ok(summaries))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    State(store): State<Arc<dyn Store>>,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    let recipe = store
        .find_recipe(id)
        .await?
        .ok_or_else(|| BackendError::not_found(RECIPE_MISSING))?;
    Ok(reply::ok(populate_detail(store.as_ref(), recipe).await?))
}

/// POST /recipes
pub async fn create_recipe(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidJson(request): ValidJson<CreateRecipeRequest>,
) -> Result<Response, BackendError> {
    let draft = request.validate()?;
    if draft.author.is_some_and(|author| author != actor.id) {
        return Err(SocialError::Forbidden.into());
    }
    require_category(store.as_ref(), draft.category).await?;

    let recipe = store
        .insert_recipe(NewRecipe {
            title: draft.title,
            picture: draft.picture,
            ready_in_minutes: draft.ready_in_minutes,
            servings: draft.servings,
            category: draft.category,
            tags: draft.tags,
            author: actor.id,
            ingredients: draft.ingredients,
            steps: draft.steps,
        })
        .await?;

    tracing::info!(recipe = %recipe.id, author = %actor.id, "Recipe created");
    Ok(reply::created(populate_detail(store.as_ref(), recipe).await?))
}

/// PATCH /recipes/{id}
pub async fn update_recipe(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidId(id): ValidId,
    ValidJson(request): ValidJson<UpdateRecipeRequest>,
) -> Result<Response, BackendError> {
    let patch = request.validate()?;

    let existing = store
        .find_recipe(id)
        .await?
        .ok_or_else(|| BackendError::bad_request(RECIPE_MISSING))?;
    if existing.author != actor.id {
        tracing::warn!(recipe = %id, actor = %actor.id, "Recipe update by non-author");
        return Err(SocialError::Forbidden.into());
    }
    require_category(store.as_ref(), patch.category).await?;

    let recipe = store
        .update_recipe(id, &patch)
        .await?
        .ok_or_else(|| BackendError::bad_request(RECIPE_MISSING))?;

    tracing::info!(recipe = %id, "Recipe updated");
    Ok(reply::ok(populate_detail(store.as_ref(), recipe).await?))
}

/// DELETE /recipes/{id}
pub async fn delete_recipe(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    service::delete_recipe(store.as_ref(), &actor, id).await?;
    Ok(reply::no_content())
}
