//! Domain records
//!
//! Plain data types for users, categories, recipes and social edges. They are
//! what the store hands back and what the API serializes.

pub mod category;
pub mod recipe;
pub mod social;
pub mod user;

pub use category::Category;
pub use recipe::{
    Ingredient, NewRecipe, Recipe, RecipeDetail, RecipeFilter, RecipePatch, RecipeSummary, Step,
    TitlePattern,
};
pub use social::{CounterDelta, Follow, FollowFilter, Like, LikeFilter};
pub use user::{NewUser, Role, User, UserPatch, UserSummary};
