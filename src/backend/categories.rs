//! Category handlers
//!
//! Reads are public; creating and deleting categories is restricted to
//! administrators. Deleting a category leaves its recipes in place with no
//! category.

use std::sync::Arc;

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::middleware::{AdminUser, ValidId, ValidJson};
use crate::backend::reply;
use crate::backend::store::Store;
use crate::shared::validation::CATEGORY_NAME_MIN_LEN;
use crate::shared::Validator;

#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
}

/// GET /categories
pub async fn list_categories(
    State(store): State<Arc<dyn Store>>,
) -> Result<Response, BackendError> {
    Ok(reply::ok(store.list_categories().await?))
}

/// GET /categories/{id}
pub async fn get_category(
    State(store): State<Arc<dyn Store>>,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    let category = store
        .find_category(id)
        .await?
        .ok_or_else(|| BackendError::not_found("The category does not exist"))?;
    Ok(reply::ok(category))
}

/// POST /categories
pub async fn create_category(
    State(store): State<Arc<dyn Store>>,
    AdminUser(admin): AdminUser,
    ValidJson(request): ValidJson<CreateCategoryRequest>,
) -> Result<Response, BackendError> {
    let mut v = Validator::new();
    let name = v.text("name", &request.name, CATEGORY_NAME_MIN_LEN);
    v.finish()?;

    let category = store.insert_category(name).await?;
    tracing::info!(category = %category.id, admin = %admin.id, "Category created");
    Ok(reply::created(category))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(store): State<Arc<dyn Store>>,
    AdminUser(admin): AdminUser,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    if !store.delete_category(id).await? {
        return Err(BackendError::bad_request("Operation could not be completed"));
    }
    tracing::info!(category = %id, admin = %admin.id, "Category deleted");
    Ok(reply::no_content())
}
