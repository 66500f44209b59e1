//! PostgreSQL implementation of comment repository.
//!
//! One table layout is shared by every board: `<board>_comments` referencing
//! `<board>_posts`, whose `comment_count` is kept in step with visible comments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Comment, CommentView, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    member_id: i64,
    parent_id: Option<i64>,
    content: String,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Comment {
            id: r.id,
            post_id: r.post_id,
            member_id: r.member_id,
            parent_id: r.parent_id,
            content: r.content,
            visible: r.visible,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    id: i64,
    post_id: i64,
    parent_id: Option<i64>,
    content: String,
    member_id: i64,
    member_nickname: String,
    rank_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentViewRow> for CommentView {
    fn from(r: CommentViewRow) -> Self {
        CommentView {
            id: r.id,
            post_id: r.post_id,
            parent_id: r.parent_id,
            content: r.content,
            member_id: r.member_id,
            member_nickname: r.member_nickname,
            rank_name: r.rank_name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const COMMENT_COLUMNS: &str =
    "id, post_id, member_id, parent_id, content, visible, created_at, updated_at";

/// PostgreSQL comment storage for a single board.
pub struct PgCommentRepository {
    pool: Arc<PgPool>,
    comments_table: &'static str,
    posts_table: &'static str,
}

impl PgCommentRepository {
    /// Comments on algorithm posts.
    pub fn algo(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            comments_table: "algo_comments",
            posts_table: "algo_posts",
        }
    }

    /// Comments on coding solution posts.
    pub fn coding(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            comments_table: "coding_comments",
            posts_table: "coding_posts",
        }
    }

    /// Comments on study recruitment posts.
    pub fn study_recruit(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            comments_table: "study_recruit_comments",
            posts_table: "study_recruit_posts",
        }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let mut tx = self.pool.begin().await?;

        let insert = format!(
            r#"
            INSERT INTO {} (post_id, member_id, parent_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMMENT_COLUMNS}
            "#,
            self.comments_table
        );
        let row = sqlx::query_as::<_, CommentRow>(&insert)
            .bind(new_comment.post_id)
            .bind(new_comment.member_id)
            .bind(new_comment.parent_id)
            .bind(&new_comment.content)
            .fetch_one(&mut *tx)
            .await?;

        let bump = format!(
            "UPDATE {} SET comment_count = comment_count + 1 WHERE id = $1",
            self.posts_table
        );
        let result = sqlx::query(&bump)
            .bind(new_comment.post_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Post not found",
                json!({ "post_id": new_comment.post_id }),
            ));
        }

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM {} WHERE id = $1",
            self.comments_table
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Comment::from))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentView>, AppError> {
        let sql = format!(
            r#"
            SELECT c.id, c.post_id, c.parent_id, c.content, c.member_id,
                   m.nickname AS member_nickname, r.name AS rank_name,
                   c.created_at, c.updated_at
            FROM {} c
            JOIN members m ON m.id = c.member_id
            JOIN member_ranks r ON r.id = m.rank_id
            WHERE c.post_id = $1 AND c.visible
            ORDER BY c.id
            "#,
            self.comments_table
        );

        let rows = sqlx::query_as::<_, CommentViewRow>(&sql)
            .bind(post_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET content = $2, updated_at = NOW()
            WHERE id = $1 AND visible
            RETURNING {COMMENT_COLUMNS}
            "#,
            self.comments_table
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .bind(content)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Comment::from).ok_or_else(|| {
            AppError::not_found("Comment not found", json!({ "comment_id": id }))
        })
    }

    async fn soft_delete_comment(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let hide = format!(
            r#"
            UPDATE {}
            SET visible = FALSE, updated_at = NOW()
            WHERE id = $1 AND visible
            RETURNING post_id
            "#,
            self.comments_table
        );
        let hidden: Option<(i64,)> = sqlx::query_as(&hide)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some((post_id,)) = hidden else {
            return Ok(false);
        };

        let drop = format!(
            "UPDATE {} SET comment_count = GREATEST(comment_count - 1, 0) WHERE id = $1",
            self.posts_table
        );
        sqlx::query(&drop).bind(post_id).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(true)
    }
}
