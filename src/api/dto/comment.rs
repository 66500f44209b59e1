//! DTOs shared by the comment endpoints of every board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Comment, CommentView};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Set to reply to another comment of the same post.
    pub parent_id: Option<i64>,

    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub member_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub is_reply: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            is_reply: c.is_reply(),
            id: c.id,
            post_id: c.post_id,
            member_id: c.member_id,
            parent_id: c.parent_id,
            content: c.content,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Comment listing row with the author's public profile.
#[derive(Debug, Serialize)]
pub struct CommentViewResponse {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub member_id: i64,
    pub member_nickname: String,
    pub rank_name: String,
    pub is_reply: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentView> for CommentViewResponse {
    fn from(c: CommentView) -> Self {
        Self {
            is_reply: c.is_reply(),
            id: c.id,
            post_id: c.post_id,
            parent_id: c.parent_id,
            content: c.content,
            member_id: c.member_id,
            member_nickname: c.member_nickname,
            rank_name: c.rank_name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
