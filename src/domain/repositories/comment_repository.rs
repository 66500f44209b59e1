//! Comment operations shared by every commentable board.

use crate::domain::entities::{Comment, CommentView, NewComment};
use crate::error::AppError;
use async_trait::async_trait;

/// Comment storage for one board.
///
/// Implementations keep the parent post's `comment_count` consistent:
/// [`create_comment`](Self::create_comment) increments it and
/// [`soft_delete_comment`](Self::soft_delete_comment) decrements it, each in the
/// same transaction as the comment write. Replies are counted like top-level
/// comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Inserts a comment and increments the post's comment counter.
    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, AppError>;

    /// Finds a comment by id regardless of visibility.
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// Lists visible comments of a post ordered by id, joined with author profile.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentView>, AppError>;

    /// Replaces the content of a visible comment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no visible comment has this id.
    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment, AppError>;

    /// Hides a visible comment and decrements the post's comment counter.
    ///
    /// Returns `false` without touching the counter if the comment was already hidden
    /// or does not exist.
    async fn soft_delete_comment(&self, id: i64) -> Result<bool, AppError>;
}
