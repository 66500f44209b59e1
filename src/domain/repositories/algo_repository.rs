//! Repository trait for algorithm roadmaps, posts and quizzes.

use crate::domain::entities::{
    AlgoPost, AlgoPostPatch, AlgoPostSummary, AlgoQuizPatch, AlgoQuizQuestion, AlgoRoadmap,
    NewAlgoPost, NewAlgoQuiz, NewAlgoRoadmap,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for algorithm learning content.
///
/// Post creation and soft deletion adjust the roadmap's `post_count` in the
/// same transaction.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAlgoRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlgoRepository: Send + Sync {
    async fn create_roadmap(&self, roadmap: NewAlgoRoadmap) -> Result<AlgoRoadmap, AppError>;

    /// Replaces a roadmap's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the roadmap does not exist.
    async fn update_roadmap(
        &self,
        id: i64,
        roadmap: NewAlgoRoadmap,
    ) -> Result<AlgoRoadmap, AppError>;

    async fn find_roadmap(&self, id: i64) -> Result<Option<AlgoRoadmap>, AppError>;

    /// Lists roadmaps by display order.
    async fn list_roadmaps(&self) -> Result<Vec<AlgoRoadmap>, AppError>;

    /// Inserts a post with its images and increments the roadmap's post counter.
    async fn create_post(&self, post: NewAlgoPost) -> Result<AlgoPost, AppError>;

    /// Finds a post with its images, regardless of visibility.
    async fn find_post(&self, id: i64) -> Result<Option<AlgoPost>, AppError>;

    /// Lists visible posts of a roadmap, oldest first.
    async fn list_posts(&self, roadmap_id: i64) -> Result<Vec<AlgoPostSummary>, AppError>;

    /// Replaces title and content, and the image list when one is given.
    async fn update_post(&self, id: i64, patch: AlgoPostPatch) -> Result<AlgoPost, AppError>;

    /// Hides a visible post and decrements the roadmap's post counter.
    ///
    /// Returns `false` if the post was already hidden or does not exist.
    async fn soft_delete_post(&self, id: i64) -> Result<bool, AppError>;

    /// Inserts a question with its options in order.
    async fn create_quiz(&self, quiz: NewAlgoQuiz) -> Result<AlgoQuizQuestion, AppError>;

    /// Finds a question with its options, regardless of visibility.
    async fn find_quiz(&self, id: i64) -> Result<Option<AlgoQuizQuestion>, AppError>;

    /// Lists visible questions of a post.
    async fn list_quizzes(&self, post_id: i64) -> Result<Vec<AlgoQuizQuestion>, AppError>;

    /// Updates question text and the content of the listed options.
    async fn update_quiz(
        &self,
        id: i64,
        patch: AlgoQuizPatch,
    ) -> Result<AlgoQuizQuestion, AppError>;

    /// Hides a visible question. Returns `false` if it was already hidden.
    async fn soft_delete_quiz(&self, id: i64) -> Result<bool, AppError>;
}
