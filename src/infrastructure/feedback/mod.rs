//! Client for the external solution-review service.
//!
//! - [`HttpFeedbackClient`] - JSON over HTTP with retries
//! - [`DisabledFeedbackClient`] - Used when no service URL is configured

mod http_feedback;

pub use http_feedback::HttpFeedbackClient;

use async_trait::async_trait;

use crate::domain::entities::{AiFeedback, FeedbackRequest};
use crate::error::AppError;

/// Requests an AI review for a coding solution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackClient: Send + Sync {
    /// Returns `Ok(None)` when the service answered without a usable review.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the service cannot be reached.
    async fn request_feedback(
        &self,
        request: FeedbackRequest,
    ) -> Result<Option<AiFeedback>, AppError>;

    fn is_enabled(&self) -> bool;
}

/// Skips feedback entirely.
#[derive(Default)]
pub struct DisabledFeedbackClient;

#[async_trait]
impl FeedbackClient for DisabledFeedbackClient {
    async fn request_feedback(
        &self,
        _request: FeedbackRequest,
    ) -> Result<Option<AiFeedback>, AppError> {
        Ok(None)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
