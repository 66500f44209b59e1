//! PostgreSQL implementation of coding board repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::{
    AiFeedback, CodingPost, CodingPostSummary, CodingProblem, NewCodingPost, NewCodingProblem,
};
use crate::domain::repositories::CodingRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ProblemRow {
    id: i64,
    title: String,
    content: String,
    platform: String,
    difficulty: String,
    post_count: i32,
    visible: bool,
    created_at: DateTime<Utc>,
}

impl From<ProblemRow> for CodingProblem {
    fn from(r: ProblemRow) -> Self {
        CodingProblem {
            id: r.id,
            title: r.title,
            content: r.content,
            platform: r.platform,
            difficulty: r.difficulty,
            post_count: r.post_count,
            visible: r.visible,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    member_id: i64,
    problem_id: i64,
    title: String,
    content: String,
    ai_big_o: Option<String>,
    ai_good: Option<String>,
    ai_bad: Option<String>,
    ai_plan: Option<String>,
    comment_count: i32,
    like_count: i32,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, images: Vec<String>) -> CodingPost {
        CodingPost {
            id: self.id,
            member_id: self.member_id,
            problem_id: self.problem_id,
            title: self.title,
            content: self.content,
            feedback: AiFeedback {
                big_o: self.ai_big_o,
                good: self.ai_good,
                bad: self.ai_bad,
                plan: self.ai_plan,
            },
            comment_count: self.comment_count,
            like_count: self.like_count,
            visible: self.visible,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    id: i64,
    problem_id: i64,
    member_id: i64,
    member_nickname: String,
    title: String,
    comment_count: i32,
    like_count: i32,
    created_at: DateTime<Utc>,
}

impl From<PostSummaryRow> for CodingPostSummary {
    fn from(r: PostSummaryRow) -> Self {
        CodingPostSummary {
            id: r.id,
            problem_id: r.problem_id,
            member_id: r.member_id,
            member_nickname: r.member_nickname,
            title: r.title,
            comment_count: r.comment_count,
            like_count: r.like_count,
            created_at: r.created_at,
        }
    }
}

const PROBLEM_COLUMNS: &str =
    "id, title, content, platform, difficulty, post_count, visible, created_at";
const POST_COLUMNS: &str = "id, member_id, problem_id, title, content, ai_big_o, ai_good, ai_bad, ai_plan, comment_count, like_count, visible, created_at, updated_at";

/// PostgreSQL repository for coding problems and solution posts.
pub struct PgCodingRepository {
    pool: Arc<PgPool>,
}

impl PgCodingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Sets a problem's counter to its number of visible posts.
    async fn resync_post_count(
        tx: &mut Transaction<'_, Postgres>,
        problem_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE coding_problems
            SET post_count = (
                SELECT COUNT(*) FROM coding_posts WHERE problem_id = $1 AND visible
            )
            WHERE id = $1
            "#,
        )
        .bind(problem_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn load_images(&self, post_id: i64) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT image_url FROM coding_post_images WHERE post_id = $1 ORDER BY id",
        )
        .bind(post_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(|(url,)| url).collect())
    }
}

#[async_trait]
impl CodingRepository for PgCodingRepository {
    async fn create_problem(&self, problem: NewCodingProblem) -> Result<CodingProblem, AppError> {
        let sql = format!(
            r#"
            INSERT INTO coding_problems (title, content, platform, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROBLEM_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProblemRow>(&sql)
            .bind(&problem.title)
            .bind(&problem.content)
            .bind(&problem.platform)
            .bind(&problem.difficulty)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_problem(&self, id: i64) -> Result<Option<CodingProblem>, AppError> {
        let sql = format!("SELECT {PROBLEM_COLUMNS} FROM coding_problems WHERE id = $1");

        let row = sqlx::query_as::<_, ProblemRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(CodingProblem::from))
    }

    async fn list_problems(&self) -> Result<Vec<CodingProblem>, AppError> {
        let sql = format!(
            "SELECT {PROBLEM_COLUMNS} FROM coding_problems WHERE visible ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, ProblemRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(CodingProblem::from).collect())
    }

    async fn create_post(&self, post: NewCodingPost) -> Result<i64, AppError> {
        let feedback = post.feedback.unwrap_or_default();
        let mut tx = self.pool.begin().await?;

        let (post_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO coding_posts
                (member_id, problem_id, title, content, ai_big_o, ai_good, ai_bad, ai_plan)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(post.member_id)
        .bind(post.problem_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&feedback.big_o)
        .bind(&feedback.good)
        .bind(&feedback.bad)
        .bind(&feedback.plan)
        .fetch_one(&mut *tx)
        .await?;

        for url in &post.image_urls {
            sqlx::query("INSERT INTO coding_post_images (post_id, image_url) VALUES ($1, $2)")
                .bind(post_id)
                .bind(url)
                .execute(&mut *tx)
                .await?;
        }

        Self::resync_post_count(&mut tx, post.problem_id).await?;

        tx.commit().await?;

        Ok(post_id)
    }

    async fn add_image(&self, post_id: i64, image_url: &str) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO coding_post_images (post_id, image_url)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(image_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn find_post(&self, id: i64) -> Result<Option<CodingPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM coding_posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => {
                let images = self.load_images(row.id).await?;
                Ok(Some(row.into_post(images)))
            }
            None => Ok(None),
        }
    }

    async fn list_posts(
        &self,
        problem_id: Option<i64>,
    ) -> Result<Vec<CodingPostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(
            r#"
            SELECT p.id, p.problem_id, p.member_id, m.nickname AS member_nickname,
                   p.title, p.comment_count, p.like_count, p.created_at
            FROM coding_posts p
            JOIN members m ON m.id = p.member_id
            WHERE p.visible
              AND ($1::BIGINT IS NULL OR p.problem_id = $1)
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(problem_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(CodingPostSummary::from).collect())
    }

    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<CodingPost, AppError> {
        let sql = format!(
            r#"
            UPDATE coding_posts
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1 AND visible
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(title)
            .bind(content)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "post_id": id })))?;

        let images = self.load_images(id).await?;
        Ok(row.into_post(images))
    }

    async fn soft_delete_post(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let hidden: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE coding_posts
            SET visible = FALSE, updated_at = NOW()
            WHERE id = $1 AND visible
            RETURNING problem_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((problem_id,)) = hidden else {
            return Ok(false);
        };

        Self::resync_post_count(&mut tx, problem_id).await?;

        tx.commit().await?;

        Ok(true)
    }
}
