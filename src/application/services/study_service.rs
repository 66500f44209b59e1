//! Study groups, membership and roadmaps.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{
    Actor, NewStudy, NewStudyRoadmap, Study, StudyRoadmapDetail, StudyRole,
};
use crate::domain::repositories::StudyRepository;
use crate::error::AppError;

/// A study with the number of members besides its leader.
#[derive(Debug, Clone)]
pub struct StudyOverview {
    pub study: Study,
    pub member_count: i64,
}

pub struct StudyService<R: StudyRepository> {
    repository: Arc<R>,
}

impl<R: StudyRepository> StudyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn require_study(&self, study_id: i64) -> Result<Study, AppError> {
        self.repository
            .find_study(study_id)
            .await?
            .ok_or_else(|| AppError::not_found("Study not found", json!({ "study_id": study_id })))
    }

    async fn require_leader(&self, actor: Actor, study_id: i64) -> Result<(), AppError> {
        self.require_study(study_id).await?;

        match self.repository.find_role(study_id, actor.member_id).await? {
            Some(StudyRole::Leader) => Ok(()),
            _ => Err(AppError::forbidden(
                "Only the study leader can do this",
                json!({ "study_id": study_id }),
            )),
        }
    }

    /// Creates a study with the actor as its leader.
    pub async fn create_study(&self, actor: Actor, study: NewStudy) -> Result<Study, AppError> {
        if study.name.trim().is_empty() {
            return Err(AppError::bad_request("Study name is required", json!({})));
        }

        let study = self.repository.create_study(actor.member_id, study).await?;
        info!(study_id = study.id, leader_id = actor.member_id, "Study created");
        Ok(study)
    }

    pub async fn get_study(&self, study_id: i64) -> Result<StudyOverview, AppError> {
        let study = self.require_study(study_id).await?;
        let member_count = self.repository.count_members(study_id).await?;

        Ok(StudyOverview {
            study,
            member_count,
        })
    }

    /// Adds a member to the study. Only the leader may do this.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the study does not exist
    /// - [`AppError::Forbidden`] if the actor is not the leader
    /// - [`AppError::Conflict`] if the member already belongs to the study
    pub async fn add_member(
        &self,
        actor: Actor,
        study_id: i64,
        member_id: i64,
    ) -> Result<(), AppError> {
        self.require_leader(actor, study_id).await?;

        self.repository
            .add_member(study_id, member_id, StudyRole::Member)
            .await?;

        info!(study_id, member_id, "Study member added");
        Ok(())
    }

    /// Creates a roadmap with ordered milestones. Leader only.
    pub async fn create_roadmap(
        &self,
        actor: Actor,
        roadmap: NewStudyRoadmap,
    ) -> Result<StudyRoadmapDetail, AppError> {
        self.require_leader(actor, roadmap.study_id).await?;

        if roadmap.title.trim().is_empty() {
            return Err(AppError::bad_request("Roadmap title is required", json!({})));
        }

        if let Some(position) = roadmap
            .milestones
            .iter()
            .position(|m| m.title.trim().is_empty())
        {
            return Err(AppError::bad_request(
                "Milestone title is required",
                json!({ "position": position }),
            ));
        }

        let detail = self.repository.create_roadmap(roadmap).await?;

        info!(
            study_id = detail.study_id,
            roadmap_id = detail.roadmap_id,
            milestones = detail.milestones.len(),
            "Study roadmap created"
        );

        Ok(detail)
    }

    /// Returns a roadmap with its milestones. Only study members may read it.
    pub async fn get_roadmap_detail(
        &self,
        actor: Actor,
        study_id: i64,
        roadmap_id: i64,
    ) -> Result<StudyRoadmapDetail, AppError> {
        self.require_study(study_id).await?;

        if self
            .repository
            .find_role(study_id, actor.member_id)
            .await?
            .is_none()
        {
            return Err(AppError::forbidden(
                "Only study members can view roadmaps",
                json!({ "study_id": study_id }),
            ));
        }

        self.repository
            .find_roadmap_detail(study_id, roadmap_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Roadmap not found",
                    json!({ "study_id": study_id, "roadmap_id": roadmap_id }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MemberRole, MilestoneInfo, NewMilestone};
    use crate::domain::repositories::MockStudyRepository;
    use chrono::Utc;

    fn study(id: i64) -> Study {
        Study {
            id,
            name: "DP club".to_string(),
            description: "weekly dp".to_string(),
            created_at: Utc::now(),
        }
    }

    fn actor(id: i64) -> Actor {
        Actor::new(id, MemberRole::User)
    }

    fn roadmap() -> NewStudyRoadmap {
        NewStudyRoadmap {
            study_id: 3,
            title: "Spring term".to_string(),
            description: "".to_string(),
            milestones: vec![
                NewMilestone {
                    title: "Knapsack".to_string(),
                    description: "0/1 and unbounded".to_string(),
                },
                NewMilestone {
                    title: "LIS".to_string(),
                    description: "n log n".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_create_study_makes_actor_leader() {
        let mut repo = MockStudyRepository::new();
        repo.expect_create_study()
            .withf(|leader, s| *leader == 7 && s.name == "DP club")
            .times(1)
            .returning(|_, _| Ok(study(3)));

        let created = StudyService::new(Arc::new(repo))
            .create_study(
                actor(7),
                NewStudy {
                    name: "DP club".to_string(),
                    description: "weekly dp".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn test_create_roadmap_by_member_is_forbidden() {
        let mut repo = MockStudyRepository::new();
        repo.expect_find_study().returning(|id| Ok(Some(study(id))));
        repo.expect_find_role()
            .returning(|_, _| Ok(Some(StudyRole::Member)));
        repo.expect_create_roadmap().never();

        let result = StudyService::new(Arc::new(repo))
            .create_roadmap(actor(8), roadmap())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_create_roadmap_keeps_milestone_order() {
        let mut repo = MockStudyRepository::new();
        repo.expect_find_study().returning(|id| Ok(Some(study(id))));
        repo.expect_find_role()
            .returning(|_, _| Ok(Some(StudyRole::Leader)));
        repo.expect_create_roadmap().returning(|r| {
            Ok(StudyRoadmapDetail {
                roadmap_id: 1,
                study_id: r.study_id,
                roadmap_title: r.title,
                roadmap_description: r.description,
                milestones: r
                    .milestones
                    .into_iter()
                    .enumerate()
                    .map(|(i, m)| MilestoneInfo {
                        milestone_id: i as i64 + 1,
                        milestone_title: m.title,
                        milestone_description: m.description,
                    })
                    .collect(),
            })
        });

        let detail = StudyService::new(Arc::new(repo))
            .create_roadmap(actor(7), roadmap())
            .await
            .unwrap();

        let titles: Vec<_> = detail
            .milestones
            .iter()
            .map(|m| m.milestone_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Knapsack", "LIS"]);
    }

    #[tokio::test]
    async fn test_roadmap_detail_for_outsider() {
        let mut repo = MockStudyRepository::new();
        repo.expect_find_study().returning(|id| Ok(Some(study(id))));
        repo.expect_find_role().returning(|_, _| Ok(None));
        repo.expect_find_roadmap_detail().never();

        let result = StudyService::new(Arc::new(repo))
            .get_roadmap_detail(actor(9), 3, 1)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_add_member_to_missing_study() {
        let mut repo = MockStudyRepository::new();
        repo.expect_find_study().returning(|_| Ok(None));
        repo.expect_add_member().never();

        let result = StudyService::new(Arc::new(repo))
            .add_member(actor(7), 99, 8)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_study_counts_members() {
        let mut repo = MockStudyRepository::new();
        repo.expect_find_study().returning(|id| Ok(Some(study(id))));
        repo.expect_count_members().returning(|_| Ok(4));

        let overview = StudyService::new(Arc::new(repo)).get_study(3).await.unwrap();

        assert_eq!(overview.member_count, 4);
    }
}
