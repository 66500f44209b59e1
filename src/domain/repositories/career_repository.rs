//! Repository trait for career information posts.

use crate::domain::entities::{CareerPost, NewCareerPost};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareerRepository: Send + Sync {
    async fn create(&self, post: NewCareerPost) -> Result<CareerPost, AppError>;

    /// Finds a post regardless of visibility.
    async fn find(&self, id: i64) -> Result<Option<CareerPost>, AppError>;

    /// Lists visible posts, newest first.
    async fn list(&self) -> Result<Vec<CareerPost>, AppError>;

    /// Hides a visible post. Returns `false` if it was already hidden.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}
