//! Likes (recommendations) on posts.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;

use crate::error::AppError;

/// Points granted to a post's author for every like received.
pub const POINTS_PER_LIKE: i32 = 1;

/// Kind of post a like points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeTarget {
    AlgoPost,
    CodingPost,
}

impl LikeTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeTarget::AlgoPost => "ALGO_POST",
            LikeTarget::CodingPost => "CODING_POST",
        }
    }

    /// Table holding the liked posts and their `like_count` column.
    pub fn posts_table(&self) -> &'static str {
        match self {
            LikeTarget::AlgoPost => "algo_posts",
            LikeTarget::CodingPost => "coding_posts",
        }
    }
}

impl FromStr for LikeTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALGO_POST" => Ok(LikeTarget::AlgoPost),
            "CODING_POST" => Ok(LikeTarget::CodingPost),
            other => Err(AppError::internal(
                "Unknown like target",
                json!({ "target": other }),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Like {
    pub id: i64,
    pub member_id: i64,
    pub target: LikeTarget,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Author and visibility of a post that is about to be liked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeablePost {
    pub author_id: i64,
    pub visible: bool,
}
