//! Comment entities shared by every commentable board.
//!
//! Algorithm posts, coding posts and study recruitment posts all keep their
//! comments in separate tables with the same shape, so a single entity and a
//! single set of threading rules cover all of them.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// Maximum comment body length in characters.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// A comment or a reply (when `parent_id` is set).
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub member_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Comment joined with its author's public profile, used for listings.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub member_id: i64,
    pub member_nickname: String,
    pub rank_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentView {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Input data for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub member_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
}

/// Validates the body of a comment.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the content is blank or too long.
pub fn validate_comment_content(content: &str) -> Result<(), AppError> {
    let length = content.trim().chars().count();

    if length == 0 {
        return Err(AppError::bad_request(
            "Comment content must not be empty",
            json!({}),
        ));
    }

    if length > MAX_COMMENT_LENGTH {
        return Err(AppError::bad_request(
            "Comment content is too long",
            json!({ "max": MAX_COMMENT_LENGTH, "provided": length }),
        ));
    }

    Ok(())
}

/// Checks that `parent` can receive a reply on post `post_id`.
///
/// A reply must point at an existing, visible comment of the same post.
///
/// # Errors
///
/// - [`AppError::NotFound`] if the parent does not exist
/// - [`AppError::Validation`] if it belongs to another post or was deleted
pub fn validate_reply_parent(
    post_id: i64,
    parent_id: i64,
    parent: Option<&Comment>,
) -> Result<(), AppError> {
    let parent = parent.ok_or_else(|| {
        AppError::not_found("Parent comment not found", json!({ "parent_id": parent_id }))
    })?;

    if parent.post_id != post_id {
        return Err(AppError::bad_request(
            "Parent comment must belong to the same post",
            json!({ "parent_id": parent_id, "post_id": post_id }),
        ));
    }

    if !parent.visible {
        return Err(AppError::bad_request(
            "Parent comment has been deleted",
            json!({ "parent_id": parent_id }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, post_id: i64, visible: bool) -> Comment {
        Comment {
            id,
            post_id,
            member_id: 1,
            parent_id: None,
            content: "first".to_string(),
            visible,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reply_to_visible_parent_on_same_post() {
        let parent = comment(3, 10, true);
        assert!(validate_reply_parent(10, 3, Some(&parent)).is_ok());
    }

    #[test]
    fn test_reply_to_missing_parent() {
        let err = validate_reply_parent(10, 3, None).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_reply_to_parent_on_other_post() {
        let parent = comment(3, 11, true);
        let err = validate_reply_parent(10, 3, Some(&parent)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_reply_to_deleted_parent() {
        let parent = comment(3, 10, false);
        let err = validate_reply_parent(10, 3, Some(&parent)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_comment_content_rules() {
        assert!(validate_comment_content("nice solution").is_ok());
        assert!(validate_comment_content("   ").is_err());
        assert!(validate_comment_content(&"a".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }
}
