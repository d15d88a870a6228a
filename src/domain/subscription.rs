use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A user following an author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub id: i32,
    /// Follower.
    pub user_id: i32,
    /// Followed author.
    pub author_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSubscription {
    pub user_id: i32,
    pub author_id: i32,
}

impl NewSubscription {
    pub fn new(user_id: i32, author_id: i32) -> Self {
        Self { user_id, author_id }
    }
}
