//! Repository trait for post likes.

use crate::domain::entities::{Like, LikeTarget, LikeablePost};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for likes across boards.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLikeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Looks up the author and visibility of the post being liked.
    async fn find_likeable(
        &self,
        target: LikeTarget,
        post_id: i64,
    ) -> Result<Option<LikeablePost>, AppError>;

    async fn exists(
        &self,
        member_id: i64,
        target: LikeTarget,
        post_id: i64,
    ) -> Result<bool, AppError>;

    /// Records a like.
    ///
    /// In one transaction: inserts the like, increments the post's `like_count`,
    /// awards `points` to `author_id` and recomputes the author's rank.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the member already liked the post.
    async fn create(
        &self,
        member_id: i64,
        target: LikeTarget,
        post_id: i64,
        author_id: i64,
        points: i32,
    ) -> Result<Like, AppError>;
}
