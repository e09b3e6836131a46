//! Social Edges
//!
//! Follow and Like edges plus the counter deltas that accompany them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `author_user` follows `target_user`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: Uuid,
    pub author_user: Uuid,
    pub target_user: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(author_user: Uuid, target_user: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_user,
            target_user,
            created_at: Utc::now(),
        }
    }

    pub fn touches(&self, user: Uuid) -> bool {
        self.author_user == user || self.target_user == user
    }
}

/// `author_user` likes `target_recipe`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub author_user: Uuid,
    pub target_recipe: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(author_user: Uuid, target_recipe: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_user,
            target_recipe,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowFilter {
    pub author_user: Option<Uuid>,
    pub target_user: Option<Uuid>,
}

impl FollowFilter {
    pub fn matches(&self, follow: &Follow) -> bool {
        self.author_user.is_none_or(|a| follow.author_user == a)
            && self.target_user.is_none_or(|t| follow.target_user == t)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeFilter {
    pub author_user: Option<Uuid>,
    pub target_recipe: Option<Uuid>,
}

impl LikeFilter {
    pub fn matches(&self, like: &Like) -> bool {
        self.author_user.is_none_or(|a| like.author_user == a)
            && self.target_recipe.is_none_or(|r| like.target_recipe == r)
    }
}

/// Signed adjustment to a user's social counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub followers: i64,
    pub following: i64,
    pub favourites: i64,
}

impl CounterDelta {
    pub fn followers(n: i64) -> Self {
        Self {
            followers: n,
            ..Self::default()
        }
    }

    pub fn following(n: i64) -> Self {
        Self {
            following: n,
            ..Self::default()
        }
    }

    pub fn favourites(n: i64) -> Self {
        Self {
            favourites: n,
            ..Self::default()
        }
    }
}
