/**
 * PostgreSQL Store
 *
 * `Store` implementation over a `sqlx::PgPool`. Every unit of work owns one
 * `sqlx::Transaction`; committing it commits the transaction and dropping it
 * rolls back.
 *
 * Rows are read into private `FromRow` structs and converted into the shared
 * domain records, so the shared crate stays free of database types.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use super::{Store, StoreError, UnitOfWork};
use crate::shared::models::{
    Category, CounterDelta, Follow, FollowFilter, Ingredient, Like, LikeFilter, NewRecipe, NewUser,
    Recipe, RecipeFilter, RecipePatch, Role, Step, User, UserPatch,
};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, followers, following, favourites, photo, created_at";

const RECIPE_COLUMNS: &str = "id, title, picture, ready_in_minutes, servings, category, tags, \
     author, ingredients, steps, likes, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    followers: i64,
    following: i64,
    favourites: i64,
    photo: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("user {} has role '{}'", row.id, row.role)))?;
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role,
            followers: row.followers,
            following: row.following,
            favourites: row.favourites,
            photo: row.photo,
            created_at: row.created_at,
        })
    }
}

fn users_from_rows(rows: Vec<UserRow>) -> Result<Vec<User>, StoreError> {
    rows.into_iter().map(User::try_from).collect()
}

#[derive(Debug, FromRow)]
struct RecipeRow {
    id: Uuid,
    title: String,
    picture: Option<String>,
    ready_in_minutes: i32,
    servings: i32,
    category: Option<Uuid>,
    tags: Vec<String>,
    author: Uuid,
    ingredients: Json<Vec<Ingredient>>,
    steps: Json<Vec<Step>>,
    likes: i64,
    created_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            title: row.title,
            picture: row.picture,
            ready_in_minutes: row.ready_in_minutes,
            servings: row.servings,
            category: row.category,
            tags: row.tags,
            author: row.author,
            ingredients: row.ingredients.0,
            steps: row.steps.0,
            likes: row.likes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
struct FollowRow {
    id: Uuid,
    author_user: Uuid,
    target_user: Uuid,
    created_at: DateTime<Utc>,
}

impl From<FollowRow> for Follow {
    fn from(row: FollowRow) -> Self {
        Follow {
            id: row.id,
            author_user: row.author_user,
            target_user: row.target_user,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct LikeRow {
    id: Uuid,
    author_user: Uuid,
    target_recipe: Uuid,
    created_at: DateTime<Utc>,
}

impl From<LikeRow> for Like {
    fn from(row: LikeRow) -> Self {
        Like {
            id: row.id,
            author_user: row.author_user,
            target_recipe: row.target_recipe,
            created_at: row.created_at,
        }
    }
}

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_user(&self, column: &str, value: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.into_user();
        let sql = format!(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, photo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.photo)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await?;
        User::try_from(row)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.fetch_user("email", email).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.fetch_user("username", username).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        users_from_rows(rows)
    }

    async fn list_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1) ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        users_from_rows(rows)
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, StoreError> {
        let sql = format!(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                photo = COALESCE($4, photo),
                role = COALESCE($5, role)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(&patch.username)
            .bind(&patch.email)
            .bind(&patch.photo)
            .bind(patch.role.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn insert_category(&self, name: String) -> Result<Category, StoreError> {
        let category = Category::new(name);
        sqlx::query(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .execute(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Category::from))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, StoreError> {
        // recipes.category is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = recipe.into_recipe();
        let sql = format!(
            r#"
            INSERT INTO recipes (id, title, picture, ready_in_minutes, servings, category, tags,
                                 author, ingredients, steps, likes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, $11)
            RETURNING {RECIPE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(recipe.id)
            .bind(&recipe.title)
            .bind(&recipe.picture)
            .bind(recipe.ready_in_minutes)
            .bind(recipe.servings)
            .bind(recipe.category)
            .bind(&recipe.tags)
            .bind(recipe.author)
            .bind(Json(&recipe.ingredients))
            .bind(Json(&recipe.steps))
            .bind(recipe.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Recipe::from))
    }

    async fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE TRUE"
        ));
        if let Some(title) = &filter.title {
            query.push(" AND title ~* ").push_bind(title.as_str().to_string());
        }
        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(author) = filter.author {
            query.push(" AND author = ").push_bind(author);
        }
        query.push(" ORDER BY created_at, id");

        let rows = query
            .build_query_as::<RecipeRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn list_recipes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, StoreError> {
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ANY($1) ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn update_recipe(
        &self,
        id: Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let sql = format!(
            r#"
            UPDATE recipes
            SET title = COALESCE($2, title),
                picture = COALESCE($3, picture),
                ready_in_minutes = COALESCE($4, ready_in_minutes),
                servings = COALESCE($5, servings),
                category = COALESCE($6, category),
                tags = COALESCE($7, tags),
                ingredients = COALESCE($8, ingredients),
                steps = COALESCE($9, steps)
            WHERE id = $1
            RETURNING {RECIPE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.picture)
            .bind(patch.ready_in_minutes)
            .bind(patch.servings)
            .bind(patch.category)
            .bind(&patch.tags)
            .bind(patch.ingredients.as_ref().map(Json))
            .bind(patch.steps.as_ref().map(Json))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Recipe::from))
    }

    async fn list_follows(&self, filter: FollowFilter) -> Result<Vec<Follow>, StoreError> {
        let rows = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT id, author_user, target_user, created_at
            FROM follows
            WHERE ($1::uuid IS NULL OR author_user = $1)
              AND ($2::uuid IS NULL OR target_user = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.author_user)
        .bind(filter.target_user)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Follow::from).collect())
    }

    async fn list_likes(&self, filter: LikeFilter) -> Result<Vec<Like>, StoreError> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT id, author_user, target_recipe, created_at
            FROM likes
            WHERE ($1::uuid IS NULL OR author_user = $1)
              AND ($2::uuid IS NULL OR target_recipe = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.author_user)
        .bind(filter.target_recipe)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Like::from).collect())
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

/// Unit of work over one PostgreSQL transaction
struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn lock_users(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>, StoreError> {
        let found = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE id = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(found)
    }

    async fn find_recipe(&mut self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row.map(Recipe::from))
    }

    async fn find_follow(
        &mut self,
        author: Uuid,
        target: Uuid,
    ) -> Result<Option<Follow>, StoreError> {
        let row = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT id, author_user, target_user, created_at
            FROM follows
            WHERE author_user = $1 AND target_user = $2
            "#,
        )
        .bind(author)
        .bind(target)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Follow::from))
    }

    async fn insert_follow(&mut self, follow: &Follow) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO follows (id, author_user, target_user, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(follow.id)
        .bind(follow.author_user)
        .bind(follow.target_user)
        .bind(follow.created_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn delete_follow(&mut self, author: Uuid, target: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM follows WHERE author_user = $1 AND target_user = $2")
            .bind(author)
            .bind(target)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_follows_involving(&mut self, user: Uuid) -> Result<Vec<Follow>, StoreError> {
        let rows = sqlx::query_as::<_, FollowRow>(
            r#"
            DELETE FROM follows
            WHERE author_user = $1 OR target_user = $1
            RETURNING id, author_user, target_user, created_at
            "#,
        )
        .bind(user)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Follow::from).collect())
    }

    async fn find_like(&mut self, author: Uuid, recipe: Uuid) -> Result<Option<Like>, StoreError> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT id, author_user, target_recipe, created_at
            FROM likes
            WHERE author_user = $1 AND target_recipe = $2
            "#,
        )
        .bind(author)
        .bind(recipe)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Like::from))
    }

    async fn insert_like(&mut self, like: &Like) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO likes (id, author_user, target_recipe, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(like.id)
        .bind(like.author_user)
        .bind(like.target_recipe)
        .bind(like.created_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn delete_like(&mut self, author: Uuid, recipe: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM likes WHERE author_user = $1 AND target_recipe = $2")
            .bind(author)
            .bind(recipe)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_likes_by_user(&mut self, user: Uuid) -> Result<Vec<Like>, StoreError> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            DELETE FROM likes
            WHERE author_user = $1
            RETURNING id, author_user, target_recipe, created_at
            "#,
        )
        .bind(user)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Like::from).collect())
    }

    async fn delete_likes_on_recipe(&mut self, recipe: Uuid) -> Result<Vec<Like>, StoreError> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            DELETE FROM likes
            WHERE target_recipe = $1
            RETURNING id, author_user, target_recipe, created_at
            "#,
        )
        .bind(recipe)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Like::from).collect())
    }

    async fn adjust_user_counters(
        &mut self,
        id: Uuid,
        delta: CounterDelta,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users
            SET followers = followers + $2,
                following = following + $3,
                favourites = favourites + $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(delta.followers)
        .bind(delta.following)
        .bind(delta.favourites)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn adjust_recipe_likes(&mut self, id: Uuid, delta: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE recipes SET likes = likes + $2 WHERE id = $1")
            .bind(id)
            .bind(delta)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn recipes_by_author(&mut self, author: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM recipes WHERE author = $1")
            .bind(author)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(ids)
    }

    async fn delete_recipe(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
