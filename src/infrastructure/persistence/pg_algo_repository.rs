//! PostgreSQL implementation of algorithm content repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{
    AlgoPost, AlgoPostPatch, AlgoPostSummary, AlgoQuizOption, AlgoQuizPatch, AlgoQuizQuestion,
    AlgoRoadmap, NewAlgoPost, NewAlgoQuiz, NewAlgoRoadmap,
};
use crate::domain::repositories::AlgoRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct RoadmapRow {
    id: i64,
    title: String,
    description: String,
    display_order: i32,
    post_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoadmapRow> for AlgoRoadmap {
    fn from(r: RoadmapRow) -> Self {
        AlgoRoadmap {
            id: r.id,
            title: r.title,
            description: r.description,
            display_order: r.display_order,
            post_count: r.post_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    roadmap_id: i64,
    member_id: i64,
    title: String,
    content: String,
    comment_count: i32,
    like_count: i32,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, images: Vec<String>) -> AlgoPost {
        AlgoPost {
            id: self.id,
            roadmap_id: self.roadmap_id,
            member_id: self.member_id,
            title: self.title,
            content: self.content,
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
    roadmap_id: i64,
    title: String,
    comment_count: i32,
    like_count: i32,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    post_id: i64,
    question: String,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    question_id: i64,
    id: i64,
    content: String,
    is_correct: bool,
}

const ROADMAP_COLUMNS: &str =
    "id, title, description, display_order, post_count, created_at, updated_at";
const POST_COLUMNS: &str = "id, roadmap_id, member_id, title, content, comment_count, like_count, visible, created_at, updated_at";
const QUESTION_COLUMNS: &str = "id, post_id, question, visible, created_at, updated_at";

/// PostgreSQL repository for roadmaps, posts and quizzes.
pub struct PgAlgoRepository {
    pool: Arc<PgPool>,
}

impl PgAlgoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_images(&self, post_id: i64) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT image_url
            FROM algo_post_images
            WHERE post_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(|(url,)| url).collect())
    }

    /// Attaches options to questions, keeping option order.
    async fn with_options(
        &self,
        questions: Vec<QuestionRow>,
    ) -> Result<Vec<AlgoQuizQuestion>, AppError> {
        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();

        let rows = sqlx::query_as::<_, OptionRow>(
            r#"
            SELECT question_id, id, content, is_correct
            FROM algo_quiz_options
            WHERE question_id = ANY($1)
            ORDER BY position, id
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_question: HashMap<i64, Vec<AlgoQuizOption>> = HashMap::new();
        for row in rows {
            by_question
                .entry(row.question_id)
                .or_default()
                .push(AlgoQuizOption {
                    id: row.id,
                    content: row.content,
                    is_correct: row.is_correct,
                });
        }

        Ok(questions
            .into_iter()
            .map(|q| AlgoQuizQuestion {
                options: by_question.remove(&q.id).unwrap_or_default(),
                id: q.id,
                post_id: q.post_id,
                question: q.question,
                visible: q.visible,
                created_at: q.created_at,
                updated_at: q.updated_at,
            })
            .collect())
    }

    async fn require_post(&self, id: i64) -> Result<AlgoPost, AppError> {
        self.find_post(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "post_id": id })))
    }

    async fn require_quiz(&self, id: i64) -> Result<AlgoQuizQuestion, AppError> {
        self.find_quiz(id)
            .await?
            .ok_or_else(|| AppError::not_found("Quiz not found", json!({ "quiz_id": id })))
    }
}

#[async_trait]
impl AlgoRepository for PgAlgoRepository {
    async fn create_roadmap(&self, roadmap: NewAlgoRoadmap) -> Result<AlgoRoadmap, AppError> {
        let sql = format!(
            r#"
            INSERT INTO algo_roadmaps (title, description, display_order)
            VALUES ($1, $2, $3)
            RETURNING {ROADMAP_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, RoadmapRow>(&sql)
            .bind(&roadmap.title)
            .bind(&roadmap.description)
            .bind(roadmap.display_order)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn update_roadmap(
        &self,
        id: i64,
        roadmap: NewAlgoRoadmap,
    ) -> Result<AlgoRoadmap, AppError> {
        let sql = format!(
            r#"
            UPDATE algo_roadmaps
            SET title = $2, description = $3, display_order = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {ROADMAP_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, RoadmapRow>(&sql)
            .bind(id)
            .bind(&roadmap.title)
            .bind(&roadmap.description)
            .bind(roadmap.display_order)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(AlgoRoadmap::from).ok_or_else(|| {
            AppError::not_found("Roadmap not found", json!({ "roadmap_id": id }))
        })
    }

    async fn find_roadmap(&self, id: i64) -> Result<Option<AlgoRoadmap>, AppError> {
        let sql = format!("SELECT {ROADMAP_COLUMNS} FROM algo_roadmaps WHERE id = $1");

        let row = sqlx::query_as::<_, RoadmapRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(AlgoRoadmap::from))
    }

    async fn list_roadmaps(&self) -> Result<Vec<AlgoRoadmap>, AppError> {
        let sql = format!("SELECT {ROADMAP_COLUMNS} FROM algo_roadmaps ORDER BY display_order, id");

        let rows = sqlx::query_as::<_, RoadmapRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(AlgoRoadmap::from).collect())
    }

    async fn create_post(&self, post: NewAlgoPost) -> Result<AlgoPost, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO algo_posts (roadmap_id, member_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {POST_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.roadmap_id)
            .bind(post.member_id)
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&mut *tx)
            .await?;

        for (position, url) in post.image_urls.iter().enumerate() {
            sqlx::query(
                "INSERT INTO algo_post_images (post_id, image_url, position) VALUES ($1, $2, $3)",
            )
            .bind(row.id)
            .bind(url)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            UPDATE algo_roadmaps
            SET post_count = post_count + 1
            WHERE id = $1
            "#,
        )
        .bind(post.roadmap_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_post(post.image_urls))
    }

    async fn find_post(&self, id: i64) -> Result<Option<AlgoPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM algo_posts WHERE id = $1");

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

    async fn list_posts(&self, roadmap_id: i64) -> Result<Vec<AlgoPostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(
            r#"
            SELECT id, roadmap_id, title, comment_count, like_count, created_at
            FROM algo_posts
            WHERE roadmap_id = $1 AND visible
            ORDER BY id
            "#,
        )
        .bind(roadmap_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AlgoPostSummary {
                id: r.id,
                roadmap_id: r.roadmap_id,
                title: r.title,
                comment_count: r.comment_count,
                like_count: r.like_count,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn update_post(&self, id: i64, patch: AlgoPostPatch) -> Result<AlgoPost, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE algo_posts
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1 AND visible
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Post not found", json!({ "post_id": id })));
        }

        if let Some(urls) = &patch.image_urls {
            sqlx::query("DELETE FROM algo_post_images WHERE post_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, url) in urls.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO algo_post_images (post_id, image_url, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(url)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.require_post(id).await
    }

    async fn soft_delete_post(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let hidden: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE algo_posts
            SET visible = FALSE, updated_at = NOW()
            WHERE id = $1 AND visible
            RETURNING roadmap_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((roadmap_id,)) = hidden else {
            return Ok(false);
        };

        sqlx::query(
            r#"
            UPDATE algo_roadmaps
            SET post_count = GREATEST(post_count - 1, 0)
            WHERE id = $1
            "#,
        )
        .bind(roadmap_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    async fn create_quiz(&self, quiz: NewAlgoQuiz) -> Result<AlgoQuizQuestion, AppError> {
        let mut tx = self.pool.begin().await?;

        let (question_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO algo_quiz_questions (post_id, question)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(quiz.post_id)
        .bind(&quiz.question)
        .fetch_one(&mut *tx)
        .await?;

        for (position, option) in quiz.options.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO algo_quiz_options (question_id, content, is_correct, position)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(question_id)
            .bind(&option.content)
            .bind(option.is_correct)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.require_quiz(question_id).await
    }

    async fn find_quiz(&self, id: i64) -> Result<Option<AlgoQuizQuestion>, AppError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM algo_quiz_questions WHERE id = $1");

        let row = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => Ok(self.with_options(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_quizzes(&self, post_id: i64) -> Result<Vec<AlgoQuizQuestion>, AppError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM algo_quiz_questions WHERE post_id = $1 AND visible ORDER BY id"
        );

        let rows = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(post_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        self.with_options(rows).await
    }

    async fn update_quiz(
        &self,
        id: i64,
        patch: AlgoQuizPatch,
    ) -> Result<AlgoQuizQuestion, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE algo_quiz_questions
            SET question = $2, updated_at = NOW()
            WHERE id = $1 AND visible
            "#,
        )
        .bind(id)
        .bind(&patch.question)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Quiz not found", json!({ "quiz_id": id })));
        }

        for (option_id, content) in &patch.options {
            let result = sqlx::query(
                r#"
                UPDATE algo_quiz_options
                SET content = $3
                WHERE id = $1 AND question_id = $2
                "#,
            )
            .bind(option_id)
            .bind(id)
            .bind(content)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::bad_request(
                    "Option does not belong to this quiz",
                    json!({ "quiz_id": id, "option_id": option_id }),
                ));
            }
        }

        tx.commit().await?;

        self.require_quiz(id).await
    }

    async fn soft_delete_quiz(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE algo_quiz_questions
            SET visible = FALSE, updated_at = NOW()
            WHERE id = $1 AND visible
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
