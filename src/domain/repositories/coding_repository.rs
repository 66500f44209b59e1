//! Repository trait for coding problems and solution posts.

use crate::domain::entities::{
    CodingPost, CodingPostSummary, CodingProblem, NewCodingPost, NewCodingProblem,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the coding board.
///
/// A problem's `post_count` is recomputed from the visible posts whenever a
/// post is created or hidden, inside the same transaction.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCodingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodingRepository: Send + Sync {
    async fn create_problem(&self, problem: NewCodingProblem) -> Result<CodingProblem, AppError>;

    async fn find_problem(&self, id: i64) -> Result<Option<CodingProblem>, AppError>;

    /// Lists visible problems, newest first.
    async fn list_problems(&self) -> Result<Vec<CodingProblem>, AppError>;

    /// Inserts a post with feedback and images, then resyncs the problem's post counter.
    ///
    /// Returns the new post id.
    async fn create_post(&self, post: NewCodingPost) -> Result<i64, AppError>;

    /// Attaches one more image URL to a post and returns the image id.
    async fn add_image(&self, post_id: i64, image_url: &str) -> Result<i64, AppError>;

    /// Finds a post with its images, regardless of visibility.
    async fn find_post(&self, id: i64) -> Result<Option<CodingPost>, AppError>;

    /// Lists visible posts, optionally for a single problem, newest first.
    async fn list_posts(&self, problem_id: Option<i64>)
    -> Result<Vec<CodingPostSummary>, AppError>;

    /// Replaces title and content of a post.
    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<CodingPost, AppError>;

    /// Hides a visible post and resyncs the problem's post counter.
    ///
    /// Returns `false` if the post was already hidden or does not exist.
    async fn soft_delete_post(&self, id: i64) -> Result<bool, AppError>;
}
