//! PostgreSQL implementation of career post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CareerPost, NewCareerPost};
use crate::domain::repositories::CareerRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CareerPostRow {
    id: i64,
    member_id: i64,
    member_nickname: String,
    title: String,
    content: String,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CareerPostRow> for CareerPost {
    fn from(r: CareerPostRow) -> Self {
        CareerPost {
            id: r.id,
            member_id: r.member_id,
            member_nickname: r.member_nickname,
            title: r.title,
            content: r.content,
            visible: r.visible,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const CAREER_SELECT: &str = r#"
    SELECT c.id, c.member_id, m.nickname AS member_nickname, c.title, c.content,
           c.visible, c.created_at, c.updated_at
    FROM career_posts c
    JOIN members m ON m.id = c.member_id
"#;

/// PostgreSQL repository for career information posts.
pub struct PgCareerRepository {
    pool: Arc<PgPool>,
}

impl PgCareerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CareerRepository for PgCareerRepository {
    async fn create(&self, post: NewCareerPost) -> Result<CareerPost, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO career_posts (member_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(post.member_id)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(self.pool.as_ref())
        .await?;

        self.find(id).await?.ok_or_else(|| {
            AppError::internal("Career post vanished after insert", json!({ "id": id }))
        })
    }

    async fn find(&self, id: i64) -> Result<Option<CareerPost>, AppError> {
        let sql = format!("{CAREER_SELECT} WHERE c.id = $1");

        let row = sqlx::query_as::<_, CareerPostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(CareerPost::from))
    }

    async fn list(&self) -> Result<Vec<CareerPost>, AppError> {
        let sql = format!("{CAREER_SELECT} WHERE c.visible ORDER BY c.created_at DESC, c.id DESC");

        let rows = sqlx::query_as::<_, CareerPostRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(CareerPost::from).collect())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE career_posts
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
