//! In-memory store
//!
//! All collections live behind one `tokio::sync::RwLock`. A unit of work
//! takes the write lock for its whole lifetime and edits a staged copy of the
//! collections; `commit` swaps the copy in, dropping the unit throws it away.
//! Unique constraints mirror the PostgreSQL schema so both stores reject the
//! same duplicates.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use uuid::Uuid;

use super::{Store, StoreError, UnitOfWork};
use crate::shared::models::{
    Category, CounterDelta, Follow, FollowFilter, Like, LikeFilter, NewRecipe, NewUser, Recipe,
    RecipeFilter, RecipePatch, User, UserPatch,
};

#[derive(Debug, Clone, Default)]
struct Collections {
    users: Vec<User>,
    categories: Vec<Category>,
    recipes: Vec<Recipe>,
    follows: Vec<Follow>,
    likes: Vec<Like>,
}

impl Collections {
    fn check_user_unique(&self, candidate: &User) -> Result<(), StoreError> {
        for user in self.users.iter().filter(|u| u.id != candidate.id) {
            if user.username == candidate.username {
                return Err(duplicate("users_username_key"));
            }
            if user.email == candidate.email {
                return Err(duplicate("users_email_key"));
            }
        }
        Ok(())
    }

    fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn recipe_mut(&mut self, id: Uuid) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    fn take_follows(&mut self, predicate: impl Fn(&Follow) -> bool) -> Vec<Follow> {
        let (removed, kept) = self.follows.drain(..).partition(|f| predicate(f));
        self.follows = kept;
        removed
    }

    fn take_likes(&mut self, predicate: impl Fn(&Like) -> bool) -> Vec<Like> {
        let (removed, kept) = self.likes.drain(..).partition(|l| predicate(l));
        self.likes = kept;
        removed
    }
}

fn duplicate(constraint: &str) -> StoreError {
    StoreError::Duplicate {
        constraint: constraint.to_string(),
    }
}

fn non_negative(value: i64, column: &str) -> Result<i64, StoreError> {
    if value < 0 {
        Err(StoreError::Constraint(format!("{} >= 0", column)))
    } else {
        Ok(value)
    }
}

/// Store backed by process memory
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut data = self.data.write().await;
        let user = user.into_user();
        data.check_user_unique(&user)?;
        data.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.data.read().await.users.clone())
    }

    async fn list_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        let data = self.data.read().await;
        Ok(data
            .users
            .iter()
            .filter(|u| wanted.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, StoreError> {
        let mut data = self.data.write().await;
        let Some(mut updated) = data.users.iter().find(|u| u.id == id).cloned() else {
            return Ok(None);
        };
        patch.apply(&mut updated);
        data.check_user_unique(&updated)?;
        if let Some(user) = data.user_mut(id) {
            *user = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn insert_category(&self, name: String) -> Result<Category, StoreError> {
        let category = Category::new(name);
        self.data.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let data = self.data.read().await;
        Ok(data.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.data.read().await.categories.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        let before = data.categories.len();
        data.categories.retain(|c| c.id != id);
        if data.categories.len() == before {
            return Ok(false);
        }
        for recipe in data.recipes.iter_mut().filter(|r| r.category == Some(id)) {
            recipe.category = None;
        }
        Ok(true)
    }

    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = recipe.into_recipe();
        self.data.write().await.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let data = self.data.read().await;
        Ok(data.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .recipes
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn list_recipes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        let data = self.data.read().await;
        Ok(data
            .recipes
            .iter()
            .filter(|r| wanted.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn update_recipe(
        &self,
        id: Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let mut data = self.data.write().await;
        Ok(data.recipe_mut(id).map(|recipe| {
            patch.apply(recipe);
            recipe.clone()
        }))
    }

    async fn list_follows(&self, filter: FollowFilter) -> Result<Vec<Follow>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .follows
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect())
    }

    async fn list_likes(&self, filter: LikeFilter) -> Result<Vec<Like>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .likes
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let guard = Arc::clone(&self.data).write_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryUnitOfWork { guard, staged }))
    }
}

/// Unit of work over a [`MemoryStore`]
///
/// Holds the write lock until committed or dropped, so units never interleave.
struct MemoryUnitOfWork {
    guard: OwnedRwLockWriteGuard<Collections>,
    staged: Collections,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn lock_users(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, StoreError> {
        let mut found: Vec<Uuid> = self
            .staged
            .users
            .iter()
            .map(|u| u.id)
            .filter(|id| ids.contains(id))
            .collect();
        found.sort();
        Ok(found)
    }

    async fn find_recipe(&mut self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        Ok(self.staged.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_follow(
        &mut self,
        author: Uuid,
        target: Uuid,
    ) -> Result<Option<Follow>, StoreError> {
        Ok(self
            .staged
            .follows
            .iter()
            .find(|f| f.author_user == author && f.target_user == target)
            .cloned())
    }

    async fn insert_follow(&mut self, follow: &Follow) -> Result<(), StoreError> {
        if follow.author_user == follow.target_user {
            return Err(StoreError::Constraint("follows_no_self".to_string()));
        }
        let exists = self
            .staged
            .follows
            .iter()
            .any(|f| f.author_user == follow.author_user && f.target_user == follow.target_user);
        if exists {
            return Err(duplicate("follows_pair_unique"));
        }
        self.staged.follows.push(follow.clone());
        Ok(())
    }

    async fn delete_follow(&mut self, author: Uuid, target: Uuid) -> Result<bool, StoreError> {
        let removed = self
            .staged
            .take_follows(|f| f.author_user == author && f.target_user == target);
        Ok(!removed.is_empty())
    }

    async fn delete_follows_involving(&mut self, user: Uuid) -> Result<Vec<Follow>, StoreError> {
        Ok(self.staged.take_follows(|f| f.touches(user)))
    }

    async fn find_like(&mut self, author: Uuid, recipe: Uuid) -> Result<Option<Like>, StoreError> {
        Ok(self
            .staged
            .likes
            .iter()
            .find(|l| l.author_user == author && l.target_recipe == recipe)
            .cloned())
    }

    async fn insert_like(&mut self, like: &Like) -> Result<(), StoreError> {
        let exists = self
            .staged
            .likes
            .iter()
            .any(|l| l.author_user == like.author_user && l.target_recipe == like.target_recipe);
        if exists {
            return Err(duplicate("likes_pair_unique"));
        }
        self.staged.likes.push(like.clone());
        Ok(())
    }

    async fn delete_like(&mut self, author: Uuid, recipe: Uuid) -> Result<bool, StoreError> {
        let removed = self
            .staged
            .take_likes(|l| l.author_user == author && l.target_recipe == recipe);
        Ok(!removed.is_empty())
    }

    async fn delete_likes_by_user(&mut self, user: Uuid) -> Result<Vec<Like>, StoreError> {
        Ok(self.staged.take_likes(|l| l.author_user == user))
    }

    async fn delete_likes_on_recipe(&mut self, recipe: Uuid) -> Result<Vec<Like>, StoreError> {
        Ok(self.staged.take_likes(|l| l.target_recipe == recipe))
    }

    async fn adjust_user_counters(
        &mut self,
        id: Uuid,
        delta: CounterDelta,
    ) -> Result<(), StoreError> {
        if let Some(user) = self.staged.user_mut(id) {
            user.followers = non_negative(user.followers + delta.followers, "followers")?;
            user.following = non_negative(user.following + delta.following, "following")?;
            user.favourites = non_negative(user.favourites + delta.favourites, "favourites")?;
        }
        Ok(())
    }

    async fn adjust_recipe_likes(&mut self, id: Uuid, delta: i64) -> Result<(), StoreError> {
        if let Some(recipe) = self.staged.recipe_mut(id) {
            recipe.likes = non_negative(recipe.likes + delta, "likes")?;
        }
        Ok(())
    }

    async fn recipes_by_author(&mut self, author: Uuid) -> Result<Vec<Uuid>, StoreError> {
        Ok(self
            .staged
            .recipes
            .iter()
            .filter(|r| r.author == author)
            .map(|r| r.id)
            .collect())
    }

    async fn delete_recipe(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let before = self.staged.recipes.len();
        self.staged.recipes.retain(|r| r.id != id);
        Ok(self.staged.recipes.len() != before)
    }

    async fn delete_user(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let before = self.staged.users.len();
        self.staged.users.retain(|u| u.id != id);
        Ok(self.staged.users.len() != before)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryUnitOfWork { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
