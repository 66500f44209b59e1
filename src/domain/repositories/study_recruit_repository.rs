//! Repository trait for study recruitment posts and applicants.

use crate::domain::entities::{
    ApplicantStatus, RecruitStatus, StudyRecruitApplicant, StudyRecruitDetail, StudyRecruitPost,
    StudyRecruitPostInput, StudyRecruitSummary,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for study recruitment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStudyRecruitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudyRecruitRepository: Send + Sync {
    async fn create_post(
        &self,
        member_id: i64,
        input: StudyRecruitPostInput,
    ) -> Result<StudyRecruitPost, AppError>;

    /// Finds a post regardless of visibility.
    async fn find_post(&self, id: i64) -> Result<Option<StudyRecruitPost>, AppError>;

    /// Detail projection of a visible post with author profile and participant count.
    async fn find_detail(&self, id: i64) -> Result<Option<StudyRecruitDetail>, AppError>;

    /// Lists visible posts, newest first.
    async fn list_posts(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudyRecruitSummary>, AppError>;

    async fn update_post(
        &self,
        id: i64,
        input: StudyRecruitPostInput,
    ) -> Result<StudyRecruitPost, AppError>;

    /// Hides a visible post. Returns `false` if it was already hidden.
    async fn soft_delete_post(&self, id: i64) -> Result<bool, AppError>;

    async fn set_status(&self, id: i64, status: RecruitStatus) -> Result<(), AppError>;

    async fn find_applicant(
        &self,
        post_id: i64,
        member_id: i64,
    ) -> Result<Option<StudyRecruitApplicant>, AppError>;

    async fn find_applicant_by_id(
        &self,
        id: i64,
    ) -> Result<Option<StudyRecruitApplicant>, AppError>;

    /// Registers a pending application.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the member already applied.
    async fn create_applicant(
        &self,
        post_id: i64,
        member_id: i64,
    ) -> Result<StudyRecruitApplicant, AppError>;

    async fn list_applicants(&self, post_id: i64)
    -> Result<Vec<StudyRecruitApplicant>, AppError>;

    async fn count_approved(&self, post_id: i64) -> Result<i64, AppError>;

    async fn set_applicant_status(
        &self,
        id: i64,
        status: ApplicantStatus,
    ) -> Result<StudyRecruitApplicant, AppError>;

    async fn delete_applicant(&self, id: i64) -> Result<(), AppError>;
}
