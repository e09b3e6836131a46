/**
 * Social Edge Operations
 *
 * Follow/unfollow, like/unlike and the cascading deletes of users and
 * recipes. Every operation here runs inside one unit of work: the edge
 * records and the counters they feed are written together or not at all.
 *
 * # Counters
 *
 * | Edge             | Counters touched                                   |
 * |------------------|----------------------------------------------------|
 * | Follow(a, b)     | `a.following`, `b.followers`                       |
 * | Like(a, recipe)  | `a.favourites`, `recipe.likes`                     |
 *
 * # Failure Handling
 *
 * Expected outcomes (duplicate edge, missing edge, missing target,
 * self-follow, ownership mismatch) return a [`SocialError`] before commit. The
 * unit of work is dropped on every early return, which rolls it back.
 *
 * # Lock Order
 *
 * Users are locked first, in id order, through `UnitOfWork::lock_users`;
 * recipes and edges come after. Follow, unfollow, like and unlike all take
 * their user locks this way, so concurrent edges on the same users queue
 * instead of deadlocking.
 */
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError, UnitOfWork};
use crate::shared::models::{CounterDelta, Follow, Like, User};

/// Outcomes of a social or cascade operation other than success
#[derive(Debug, Error)]
pub enum SocialError {
    /// An actor tried to follow itself
    #[error("Invalid operation")]
    SelfReference,

    /// The user or recipe the operation targets does not exist
    #[error("The {0} does not exist")]
    TargetMissing(&'static str),

    /// The edge being created is already there
    #[error("The operation is not valid")]
    AlreadyExists,

    /// The edge being removed is not there
    #[error("Operation could not be completed")]
    NotFound,

    /// The actor does not own the record it is acting on
    #[error("You do not have permission to perform this operation")]
    Forbidden,

    /// Unexpected store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create Follow(actor, target) and bump both counters
pub async fn follow(store: &dyn Store, actor: Uuid, target: Uuid) -> Result<Follow, SocialError> {
    if actor == target {
        return Err(SocialError::SelfReference);
    }

    let mut uow = store.begin().await?;
    let locked = uow.lock_users(&[actor, target]).await?;
    if !locked.contains(&actor) {
        return Err(SocialError::TargetMissing("user"));
    }
    if !locked.contains(&target) {
        return Err(SocialError::TargetMissing("target user"));
    }
    if uow.find_follow(actor, target).await?.is_some() {
        return Err(SocialError::AlreadyExists);
    }

    let follow = Follow::new(actor, target);
    uow.insert_follow(&follow).await?;
    uow.adjust_user_counters(target, CounterDelta::followers(1)).await?;
    uow.adjust_user_counters(actor, CounterDelta::following(1)).await?;
    uow.commit().await?;

    tracing::info!(%actor, %target, "Follow created");
    Ok(follow)
}

/// Remove Follow(actor, target) and drop both counters
pub async fn unfollow(store: &dyn Store, actor: Uuid, target: Uuid) -> Result<(), SocialError> {
    let mut uow = store.begin().await?;
    uow.lock_users(&[actor, target]).await?;
    if !uow.delete_follow(actor, target).await? {
        return Err(SocialError::NotFound);
    }
    uow.adjust_user_counters(target, CounterDelta::followers(-1)).await?;
    uow.adjust_user_counters(actor, CounterDelta::following(-1)).await?;
    uow.commit().await?;

    tracing::info!(%actor, %target, "Follow removed");
    Ok(())
}

/// Create Like(actor, recipe) and bump the recipe and actor counters
pub async fn like(store: &dyn Store, actor: Uuid, recipe: Uuid) -> Result<Like, SocialError> {
    let mut uow = store.begin().await?;
    if uow.lock_users(&[actor]).await?.is_empty() {
        return Err(SocialError::TargetMissing("user"));
    }
    if uow.find_recipe(recipe).await?.is_none() {
        return Err(SocialError::TargetMissing("recipe"));
    }
    if uow.find_like(actor, recipe).await?.is_some() {
        return Err(SocialError::AlreadyExists);
    }

    let like = Like::new(actor, recipe);
    uow.insert_like(&like).await?;
    uow.adjust_recipe_likes(recipe, 1).await?;
    uow.adjust_user_counters(actor, CounterDelta::favourites(1)).await?;
    uow.commit().await?;

    tracing::info!(%actor, %recipe, "Like created");
    Ok(like)
}

/// Remove Like(actor, recipe) and drop the recipe and actor counters
pub async fn unlike(store: &dyn Store, actor: Uuid, recipe: Uuid) -> Result<(), SocialError> {
    let mut uow = store.begin().await?;
    uow.lock_users(&[actor]).await?;
    if !uow.delete_like(actor, recipe).await? {
        return Err(SocialError::NotFound);
    }
    uow.adjust_recipe_likes(recipe, -1).await?;
    uow.adjust_user_counters(actor, CounterDelta::favourites(-1)).await?;
    uow.commit().await?;

    tracing::info!(%actor, %recipe, "Like removed");
    Ok(())
}

/// Remove a recipe and its likes, giving each liker back a favourite
async fn remove_recipe(uow: &mut dyn UnitOfWork, recipe: Uuid) -> Result<(), StoreError> {
    for like in uow.delete_likes_on_recipe(recipe).await? {
        uow.adjust_user_counters(like.author_user, CounterDelta::favourites(-1))
            .await?;
    }
    uow.delete_recipe(recipe).await?;
    Ok(())
}

/// Delete a recipe on behalf of its author
pub async fn delete_recipe(store: &dyn Store, actor: &User, recipe: Uuid) -> Result<(), SocialError> {
    let mut uow = store.begin().await?;
    let found = uow
        .find_recipe(recipe)
        .await?
        .ok_or(SocialError::TargetMissing("recipe"))?;
    if found.author != actor.id {
        return Err(SocialError::Forbidden);
    }

    remove_recipe(uow.as_mut(), recipe).await?;
    uow.commit().await?;

    tracing::info!(actor = %actor.id, %recipe, "Recipe deleted");
    Ok(())
}

/// Delete a user with every edge and recipe that hangs off it
///
/// Allowed for the user itself and for administrators.
pub async fn delete_user(store: &dyn Store, actor: &User, user: Uuid) -> Result<(), SocialError> {
    let mut uow = store.begin().await?;
    if uow.lock_users(&[user]).await?.is_empty() {
        return Err(SocialError::TargetMissing("user"));
    }
    if actor.id != user && !actor.is_admin() {
        return Err(SocialError::Forbidden);
    }

    for follow in uow.delete_follows_involving(user).await? {
        if follow.author_user == user {
            uow.adjust_user_counters(follow.target_user, CounterDelta::followers(-1))
                .await?;
        } else {
            uow.adjust_user_counters(follow.author_user, CounterDelta::following(-1))
                .await?;
        }
    }
    for like in uow.delete_likes_by_user(user).await? {
        uow.adjust_recipe_likes(like.target_recipe, -1).await?;
    }
    for recipe in uow.recipes_by_author(user).await? {
        remove_recipe(uow.as_mut(), recipe).await?;
    }
    uow.delete_user(user).await?;
    uow.commit().await?;

    tracing::info!(actor = %actor.id, %user, "User deleted");
    Ok(())
}
