//! PostgreSQL implementation of study recruitment repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    ApplicantStatus, RecruitStatus, StudyRecruitApplicant, StudyRecruitDetail, StudyRecruitPost,
    StudyRecruitPostInput, StudyRecruitSummary,
};
use crate::domain::repositories::StudyRecruitRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    member_id: i64,
    title: String,
    content: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    expires_at: DateTime<Utc>,
    capacity: i32,
    status: String,
    comment_count: i32,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for StudyRecruitPost {
    type Error = AppError;

    fn try_from(r: PostRow) -> Result<Self, Self::Error> {
        Ok(StudyRecruitPost {
            id: r.id,
            member_id: r.member_id,
            title: r.title,
            content: r.content,
            start_date: r.start_date,
            end_date: r.end_date,
            expires_at: r.expires_at,
            capacity: r.capacity,
            status: r.status.parse()?,
            comment_count: r.comment_count,
            visible: r.visible,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DetailRow {
    id: i64,
    member_id: i64,
    title: String,
    content: String,
    member_nickname: String,
    rank_name: String,
    status: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    expires_at: DateTime<Utc>,
    capacity: i32,
    participant_count: i64,
    comment_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DetailRow> for StudyRecruitDetail {
    type Error = AppError;

    fn try_from(r: DetailRow) -> Result<Self, Self::Error> {
        Ok(StudyRecruitDetail {
            id: r.id,
            member_id: r.member_id,
            title: r.title,
            content: r.content,
            member_nickname: r.member_nickname,
            rank_name: r.rank_name,
            status: r.status.parse()?,
            start_date: r.start_date,
            end_date: r.end_date,
            expires_at: r.expires_at,
            capacity: r.capacity,
            participant_count: r.participant_count,
            comment_count: r.comment_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    title: String,
    member_nickname: String,
    status: String,
    capacity: i32,
    participant_count: i64,
    comment_count: i32,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for StudyRecruitSummary {
    type Error = AppError;

    fn try_from(r: SummaryRow) -> Result<Self, Self::Error> {
        Ok(StudyRecruitSummary {
            id: r.id,
            title: r.title,
            member_nickname: r.member_nickname,
            status: r.status.parse()?,
            capacity: r.capacity,
            participant_count: r.participant_count,
            comment_count: r.comment_count,
            expires_at: r.expires_at,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ApplicantRow {
    id: i64,
    post_id: i64,
    member_id: i64,
    member_nickname: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ApplicantRow> for StudyRecruitApplicant {
    type Error = AppError;

    fn try_from(r: ApplicantRow) -> Result<Self, Self::Error> {
        Ok(StudyRecruitApplicant {
            id: r.id,
            post_id: r.post_id,
            member_id: r.member_id,
            member_nickname: r.member_nickname,
            status: r.status.parse()?,
            created_at: r.created_at,
        })
    }
}

const POST_COLUMNS: &str = "id, member_id, title, content, start_date, end_date, expires_at, capacity, status, comment_count, visible, created_at, updated_at";

const APPLICANT_SELECT: &str = r#"
    SELECT a.id, a.post_id, a.member_id, m.nickname AS member_nickname, a.status, a.created_at
    FROM study_recruit_applicants a
    JOIN members m ON m.id = a.member_id
"#;

const APPROVED_COUNT: &str = r#"
    (SELECT COUNT(*) FROM study_recruit_applicants a
     WHERE a.post_id = p.id AND a.status = 'APPROVED')
"#;

/// PostgreSQL repository for study recruitment posts and applicants.
pub struct PgStudyRecruitRepository {
    pool: Arc<PgPool>,
}

impl PgStudyRecruitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn applicant_where(
        &self,
        filter: &str,
        a: i64,
        b: Option<i64>,
    ) -> Result<Option<StudyRecruitApplicant>, AppError> {
        let sql = format!("{APPLICANT_SELECT} WHERE {filter}");

        let mut query = sqlx::query_as::<_, ApplicantRow>(&sql).bind(a);
        if let Some(b) = b {
            query = query.bind(b);
        }

        let row = query.fetch_optional(self.pool.as_ref()).await?;
        row.map(StudyRecruitApplicant::try_from).transpose()
    }
}

#[async_trait]
impl StudyRecruitRepository for PgStudyRecruitRepository {
    async fn create_post(
        &self,
        member_id: i64,
        input: StudyRecruitPostInput,
    ) -> Result<StudyRecruitPost, AppError> {
        let sql = format!(
            r#"
            INSERT INTO study_recruit_posts
                (member_id, title, content, start_date, end_date, expires_at, capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(member_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.expires_at)
            .bind(input.capacity)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_post(&self, id: i64) -> Result<Option<StudyRecruitPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM study_recruit_posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(StudyRecruitPost::try_from).transpose()
    }

    async fn find_detail(&self, id: i64) -> Result<Option<StudyRecruitDetail>, AppError> {
        let sql = format!(
            r#"
            SELECT p.id, p.member_id, p.title, p.content,
                   m.nickname AS member_nickname, r.name AS rank_name,
                   p.status, p.start_date, p.end_date, p.expires_at, p.capacity,
                   {APPROVED_COUNT} AS participant_count,
                   p.comment_count, p.created_at, p.updated_at
            FROM study_recruit_posts p
            JOIN members m ON m.id = p.member_id
            JOIN member_ranks r ON r.id = m.rank_id
            WHERE p.id = $1 AND p.visible
            "#
        );

        let row = sqlx::query_as::<_, DetailRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(StudyRecruitDetail::try_from).transpose()
    }

    async fn list_posts(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudyRecruitSummary>, AppError> {
        let sql = format!(
            r#"
            SELECT p.id, p.title, m.nickname AS member_nickname, p.status, p.capacity,
                   {APPROVED_COUNT} AS participant_count,
                   p.comment_count, p.expires_at, p.created_at
            FROM study_recruit_posts p
            JOIN members m ON m.id = p.member_id
            WHERE p.visible
            ORDER BY p.created_at DESC, p.id DESC
            OFFSET $1 LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, SummaryRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter()
            .map(StudyRecruitSummary::try_from)
            .collect()
    }

    async fn update_post(
        &self,
        id: i64,
        input: StudyRecruitPostInput,
    ) -> Result<StudyRecruitPost, AppError> {
        let sql = format!(
            r#"
            UPDATE study_recruit_posts
            SET title = $2, content = $3, start_date = $4, end_date = $5,
                expires_at = $6, capacity = $7, updated_at = NOW()
            WHERE id = $1 AND visible
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.expires_at)
            .bind(input.capacity)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "post_id": id })))?;

        row.try_into()
    }

    async fn soft_delete_post(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE study_recruit_posts
            SET visible = FALSE, updated_at = NOW()
            WHERE id = $1 AND visible
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_status(&self, id: i64, status: RecruitStatus) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE study_recruit_posts
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Post not found", json!({ "post_id": id })));
        }

        Ok(())
    }

    async fn find_applicant(
        &self,
        post_id: i64,
        member_id: i64,
    ) -> Result<Option<StudyRecruitApplicant>, AppError> {
        self.applicant_where("a.post_id = $1 AND a.member_id = $2", post_id, Some(member_id))
            .await
    }

    async fn find_applicant_by_id(
        &self,
        id: i64,
    ) -> Result<Option<StudyRecruitApplicant>, AppError> {
        self.applicant_where("a.id = $1", id, None).await
    }

    async fn create_applicant(
        &self,
        post_id: i64,
        member_id: i64,
    ) -> Result<StudyRecruitApplicant, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO study_recruit_applicants (post_id, member_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(member_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        self.find_applicant_by_id(id).await?.ok_or_else(|| {
            AppError::internal("Applicant vanished after insert", json!({ "id": id }))
        })
    }

    async fn list_applicants(
        &self,
        post_id: i64,
    ) -> Result<Vec<StudyRecruitApplicant>, AppError> {
        let sql = format!("{APPLICANT_SELECT} WHERE a.post_id = $1 ORDER BY a.id");

        let rows = sqlx::query_as::<_, ApplicantRow>(&sql)
            .bind(post_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter()
            .map(StudyRecruitApplicant::try_from)
            .collect()
    }

    async fn count_approved(&self, post_id: i64) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM study_recruit_applicants
            WHERE post_id = $1 AND status = 'APPROVED'
            "#,
        )
        .bind(post_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn set_applicant_status(
        &self,
        id: i64,
        status: ApplicantStatus,
    ) -> Result<StudyRecruitApplicant, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE study_recruit_applicants
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Applicant not found",
                json!({ "applicant_id": id }),
            ));
        }

        self.find_applicant_by_id(id).await?.ok_or_else(|| {
            AppError::not_found("Applicant not found", json!({ "applicant_id": id }))
        })
    }

    async fn delete_applicant(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM study_recruit_applicants WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
