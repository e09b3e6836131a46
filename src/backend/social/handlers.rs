/**
 * Social Edge Handlers
 *
 * Two ways to reach the same operations:
 *
 * - Flat collections: `/follows` and `/likes`, with the edge described in the
 *   request body.
 * - Per-user routes: `/users/{id}/followings`, `/users/{id}/followers` and
 *   `/users/{id}/likes`, where `{id}` must be the authenticated user for
 *   writes.
 *
 * Creations return 201 with the new edge, removals return 204.
 */
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidId, ValidIdPair, ValidJson};
use crate::backend::recipes::populate_summaries;
use crate::backend::reply;
use crate::backend::social::service::{self, SocialError};
use crate::backend::store::Store;
use crate::shared::models::{FollowFilter, LikeFilter, User};
use crate::shared::Validator;

/// Query for `GET /follows`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowQuery {
    pub author_user: Option<String>,
    pub target_user: Option<String>,
}

/// Body for `POST /follows`, `DELETE /follows` and `POST /users/{id}/followings`
///
/// `authorUser` may be omitted; when present it must name the caller.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowBody {
    #[serde(default)]
    pub author_user: Option<String>,
    #[serde(default)]
    pub target_user: String,
}

/// Body for `POST /likes`, `DELETE /likes` and `POST /users/{id}/likes`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeBody {
    #[serde(default)]
    pub target_recipe: String,
}

fn ensure_self(actor: &User, id: Uuid) -> Result<(), BackendError> {
    if actor.id != id {
        tracing::warn!(actor = %actor.id, %id, "Edge write on behalf of another user");
        return Err(SocialError::Forbidden.into());
    }
    Ok(())
}

/// Validate a follow body; returns the target id
fn follow_target(actor: &User, body: &FollowBody) -> Result<Uuid, BackendError> {
    let mut v = Validator::new();
    let author = v.optional_id("authorUser", body.author_user.as_deref());
    let target = v.id("targetUser", &body.target_user);
    v.finish()?;
    if let Some(author) = author {
        ensure_self(actor, author)?;
    }
    Ok(target)
}

fn like_target(body: &LikeBody) -> Result<Uuid, BackendError> {
    let mut v = Validator::new();
    let recipe = v.id("targetRecipe", &body.target_recipe);
    v.finish()?;
    Ok(recipe)
}

/// Reorder `records` to follow `ids`, dropping records with no matching id
fn in_order<T>(ids: &[Uuid], records: Vec<T>, key: impl Fn(&T) -> Uuid) -> Vec<T> {
    let mut by_id: HashMap<Uuid, T> = records.into_iter().map(|r| (key(&r), r)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

async fn require_user(store: &dyn Store, id: Uuid) -> Result<(), BackendError> {
    match store.find_user(id).await? {
        Some(_) => Ok(()),
        None => Err(BackendError::not_found("The user does not exist")),
    }
}

/// GET /follows?authorUser&targetUser
pub async fn list_follows(
    State(store): State<Arc<dyn Store>>,
    Query(query): Query<FollowQuery>,
) -> Result<Response, BackendError> {
    let mut v = Validator::new();
    let filter = FollowFilter {
        author_user: v.optional_id("authorUser", query.author_user.as_deref()),
        target_user: v.optional_id("targetUser", query.target_user.as_deref()),
    };
    v.finish()?;

    let follows = store.list_follows(filter).await?;
    Ok(reply::ok(follows))
}

/// POST /follows
pub async fn create_follow(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidJson(body): ValidJson<FollowBody>,
) -> Result<Response, BackendError> {
    let target = follow_target(&actor, &body)?;
    let follow = service::follow(store.as_ref(), actor.id, target).await?;
    Ok(reply::created(follow))
}

/// DELETE /follows
pub async fn delete_follow(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidJson(body): ValidJson<FollowBody>,
) -> Result<Response, BackendError> {
    let target = follow_target(&actor, &body)?;
    service::unfollow(store.as_ref(), actor.id, target).await?;
    Ok(reply::no_content())
}

/// GET /likes - the caller's likes
pub async fn list_likes(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
) -> Result<Response, BackendError> {
    let likes = store
        .list_likes(LikeFilter {
            author_user: Some(actor.id),
            target_recipe: None,
        })
        .await?;
    Ok(reply::ok(likes))
}

/// POST /likes
pub async fn create_like(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidJson(body): ValidJson<LikeBody>,
) -> Result<Response, BackendError> {
    let recipe = like_target(&body)?;
    let like = service::like(store.as_ref(), actor.id, recipe).await?;
    Ok(reply::created(like))
}

/// DELETE /likes
pub async fn delete_like(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidJson(body): ValidJson<LikeBody>,
) -> Result<Response, BackendError> {
    let recipe = like_target(&body)?;
    service::unlike(store.as_ref(), actor.id, recipe).await?;
    Ok(reply::no_content())
}

/// GET /users/{id}/followings - users `{id}` follows
pub async fn list_followings(
    State(store): State<Arc<dyn Store>>,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    require_user(store.as_ref(), id).await?;
    let follows = store
        .list_follows(FollowFilter {
            author_user: Some(id),
            target_user: None,
        })
        .await?;
    let ids: Vec<Uuid> = follows.iter().map(|f| f.target_user).collect();
    let users = store.list_users_by_ids(&ids).await?;
    Ok(reply::ok(in_order(&ids, users, |u| u.id)))
}

/// GET /users/{id}/followers - users following `{id}`
pub async fn list_followers(
    State(store): State<Arc<dyn Store>>,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    require_user(store.as_ref(), id).await?;
    let follows = store
        .list_follows(FollowFilter {
            author_user: None,
            target_user: Some(id),
        })
        .await?;
    let ids: Vec<Uuid> = follows.iter().map(|f| f.author_user).collect();
    let users = store.list_users_by_ids(&ids).await?;
    Ok(reply::ok(in_order(&ids, users, |u| u.id)))
}

/// POST /users/{id}/followings
pub async fn add_following(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidId(id): ValidId,
    ValidJson(body): ValidJson<FollowBody>,
) -> Result<Response, BackendError> {
    ensure_self(&actor, id)?;
    let target = follow_target(&actor, &body)?;
    let follow = service::follow(store.as_ref(), actor.id, target).await?;
    Ok(reply::created(follow))
}

/// DELETE /users/{id}/followings/{targetId}
pub async fn remove_following(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidIdPair(id, target): ValidIdPair,
) -> Result<Response, BackendError> {
    ensure_self(&actor, id)?;
    service::unfollow(store.as_ref(), actor.id, target).await?;
    Ok(reply::no_content())
}

/// GET /users/{id}/likes - recipes `{id}` liked
pub async fn list_user_likes(
    State(store): State<Arc<dyn Store>>,
    ValidId(id): ValidId,
) -> Result<Response, BackendError> {
    require_user(store.as_ref(), id).await?;
    let likes = store
        .list_likes(LikeFilter {
            author_user: Some(id),
            target_recipe: None,
        })
        .await?;
    let ids: Vec<Uuid> = likes.iter().map(|l| l.target_recipe).collect();
    let recipes = store.list_recipes_by_ids(&ids).await?;
    let recipes = in_order(&ids, recipes, |r| r.id);
    let summaries = populate_summaries(store.as_ref(), recipes).await?;
    Ok(reply::ok(summaries))
}

/// POST /users/{id}/likes
pub async fn add_user_like(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidId(id): ValidId,
    ValidJson(body): ValidJson<LikeBody>,
) -> Result<Response, BackendError> {
    ensure_self(&actor, id)?;
    let recipe = like_target(&body)?;
    let like = service::like(store.as_ref(), actor.id, recipe).await?;
    Ok(reply::created(like))
}

/// DELETE /users/{id}/likes/{recipeId}
pub async fn remove_user_like(
    State(store): State<Arc<dyn Store>>,
    AuthUser(actor): AuthUser,
    ValidIdPair(id, recipe): ValidIdPair,
) -> Result<Response, BackendError> {
    ensure_self(&actor, id)?;
    service::unlike(store.as_ref(), actor.id, recipe).await?;
    Ok(reply::no_content())
}
