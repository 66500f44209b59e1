//! PostgreSQL implementation of study group repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    MilestoneInfo, NewStudy, NewStudyRoadmap, Study, StudyRoadmapDetail, StudyRole,
};
use crate::domain::repositories::StudyRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct StudyRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<StudyRow> for Study {
    fn from(r: StudyRow) -> Self {
        Study {
            id: r.id,
            name: r.name,
            description: r.description,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MilestoneRow {
    id: i64,
    title: String,
    description: String,
}

/// PostgreSQL repository for study groups, memberships and roadmaps.
pub struct PgStudyRepository {
    pool: Arc<PgPool>,
}

impl PgStudyRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudyRepository for PgStudyRepository {
    async fn create_study(&self, leader_id: i64, study: NewStudy) -> Result<Study, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, StudyRow>(
            r#"
            INSERT INTO studies (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&study.name)
        .bind(&study.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO study_members (study_id, member_id, role) VALUES ($1, $2, $3)")
            .bind(row.id)
            .bind(leader_id)
            .bind(StudyRole::Leader.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_study(&self, id: i64) -> Result<Option<Study>, AppError> {
        let row = sqlx::query_as::<_, StudyRow>(
            "SELECT id, name, description, created_at FROM studies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Study::from))
    }

    async fn find_role(
        &self,
        study_id: i64,
        member_id: i64,
    ) -> Result<Option<StudyRole>, AppError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT role FROM study_members WHERE study_id = $1 AND member_id = $2",
        )
        .bind(study_id)
        .bind(member_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|(role,)| role.parse()).transpose()
    }

    async fn add_member(
        &self,
        study_id: i64,
        member_id: i64,
        role: StudyRole,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO study_members (study_id, member_id, role) VALUES ($1, $2, $3)")
            .bind(study_id)
            .bind(member_id)
            .bind(role.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn count_members(&self, study_id: i64) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM study_members WHERE study_id = $1 AND role <> 'LEADER'",
        )
        .bind(study_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn create_roadmap(
        &self,
        roadmap: NewStudyRoadmap,
    ) -> Result<StudyRoadmapDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let (roadmap_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO study_roadmaps (study_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(roadmap.study_id)
        .bind(&roadmap.title)
        .bind(&roadmap.description)
        .fetch_one(&mut *tx)
        .await?;

        let mut milestones = Vec::with_capacity(roadmap.milestones.len());
        for (position, milestone) in roadmap.milestones.into_iter().enumerate() {
            let (milestone_id,): (i64,) = sqlx::query_as(
                r#"
                INSERT INTO study_milestones (roadmap_id, title, description, position)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(roadmap_id)
            .bind(&milestone.title)
            .bind(&milestone.description)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;

            milestones.push(MilestoneInfo {
                milestone_id,
                milestone_title: milestone.title,
                milestone_description: milestone.description,
            });
        }

        tx.commit().await?;

        Ok(StudyRoadmapDetail {
            roadmap_id,
            study_id: roadmap.study_id,
            roadmap_title: roadmap.title,
            roadmap_description: roadmap.description,
            milestones,
        })
    }

    async fn find_roadmap_detail(
        &self,
        study_id: i64,
        roadmap_id: i64,
    ) -> Result<Option<StudyRoadmapDetail>, AppError> {
        let roadmap: Option<(String, String)> = sqlx::query_as(
            "SELECT title, description FROM study_roadmaps WHERE id = $1 AND study_id = $2",
        )
        .bind(roadmap_id)
        .bind(study_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some((title, description)) = roadmap else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, MilestoneRow>(
            r#"
            SELECT id, title, description
            FROM study_milestones
            WHERE roadmap_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(roadmap_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Some(StudyRoadmapDetail {
            roadmap_id,
            study_id,
            roadmap_title: title,
            roadmap_description: description,
            milestones: rows
                .into_iter()
                .map(|m| MilestoneInfo {
                    milestone_id: m.id,
                    milestone_title: m.title,
                    milestone_description: m.description,
                })
                .collect(),
        }))
    }
}
