//! Algorithm learning entities: roadmaps, posts and quizzes.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// Bounds on the number of options a quiz question may have.
pub const MIN_QUIZ_OPTIONS: usize = 2;
pub const MAX_QUIZ_OPTIONS: usize = 5;

/// An ordered learning roadmap that groups algorithm posts.
#[derive(Debug, Clone)]
pub struct AlgoRoadmap {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub display_order: i32,
    pub post_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating or replacing a roadmap.
#[derive(Debug, Clone)]
pub struct NewAlgoRoadmap {
    pub title: String,
    pub description: String,
    pub display_order: i32,
}

/// A learning post written by an admin under a roadmap.
#[derive(Debug, Clone)]
pub struct AlgoPost {
    pub id: i64,
    pub roadmap_id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub visible: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row for algorithm posts.
#[derive(Debug, Clone)]
pub struct AlgoPostSummary {
    pub id: i64,
    pub roadmap_id: i64,
    pub title: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a post. Images are already uploaded.
#[derive(Debug, Clone)]
pub struct NewAlgoPost {
    pub roadmap_id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
}

/// Replacement content for a post. `image_urls: None` keeps existing images.
#[derive(Debug, Clone)]
pub struct AlgoPostPatch {
    pub title: String,
    pub content: String,
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct AlgoQuizOption {
    pub id: i64,
    pub content: String,
    pub is_correct: bool,
}

/// A multiple-choice question attached to an algorithm post.
#[derive(Debug, Clone)]
pub struct AlgoQuizQuestion {
    pub id: i64,
    pub post_id: i64,
    pub question: String,
    pub visible: bool,
    pub options: Vec<AlgoQuizOption>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlgoQuizQuestion {
    pub fn correct_option_id(&self) -> Option<i64> {
        self.options.iter().find(|o| o.is_correct).map(|o| o.id)
    }
}

#[derive(Debug, Clone)]
pub struct NewAlgoQuizOption {
    pub content: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct NewAlgoQuiz {
    pub post_id: i64,
    pub question: String,
    pub options: Vec<NewAlgoQuizOption>,
}

impl NewAlgoQuiz {
    /// Checks option count and that exactly one option is correct.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the question is blank, the option
    /// count is out of range, an option is blank, or the number of correct
    /// options is not one.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.question.trim().is_empty() {
            return Err(AppError::bad_request(
                "Quiz question must not be empty",
                json!({}),
            ));
        }

        let count = self.options.len();
        if !(MIN_QUIZ_OPTIONS..=MAX_QUIZ_OPTIONS).contains(&count) {
            return Err(AppError::bad_request(
                "Invalid number of quiz options",
                json!({ "min": MIN_QUIZ_OPTIONS, "max": MAX_QUIZ_OPTIONS, "provided": count }),
            ));
        }

        if self.options.iter().any(|o| o.content.trim().is_empty()) {
            return Err(AppError::bad_request(
                "Quiz option content must not be empty",
                json!({}),
            ));
        }

        let correct = self.options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            return Err(AppError::bad_request(
                "Exactly one quiz option must be correct",
                json!({ "correct_options": correct }),
            ));
        }

        Ok(())
    }
}

/// Edit of an existing quiz: question text and option contents only.
#[derive(Debug, Clone)]
pub struct AlgoQuizPatch {
    pub question: String,
    pub options: Vec<(i64, String)>,
}
