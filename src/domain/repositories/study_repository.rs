//! Repository trait for study groups and their roadmaps.

use crate::domain::entities::{NewStudy, NewStudyRoadmap, Study, StudyRoadmapDetail, StudyRole};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for study groups.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStudyRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudyRepository: Send + Sync {
    /// Creates a study and registers `leader_id` as its leader in one transaction.
    async fn create_study(&self, leader_id: i64, study: NewStudy) -> Result<Study, AppError>;

    async fn find_study(&self, id: i64) -> Result<Option<Study>, AppError>;

    /// Role of a member within a study, `None` if not a member.
    async fn find_role(&self, study_id: i64, member_id: i64)
    -> Result<Option<StudyRole>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the member already belongs to the study.
    async fn add_member(
        &self,
        study_id: i64,
        member_id: i64,
        role: StudyRole,
    ) -> Result<(), AppError>;

    /// Number of members excluding the leader.
    async fn count_members(&self, study_id: i64) -> Result<i64, AppError>;

    /// Inserts a roadmap with its milestones in the given order.
    async fn create_roadmap(
        &self,
        roadmap: NewStudyRoadmap,
    ) -> Result<StudyRoadmapDetail, AppError>;

    async fn find_roadmap_detail(
        &self,
        study_id: i64,
        roadmap_id: i64,
    ) -> Result<Option<StudyRoadmapDetail>, AppError>;
}
