//! DTOs for the algorithm learning board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use validator::Validate;

use crate::domain::entities::{
    AlgoPost, AlgoPostPatch, AlgoPostSummary, AlgoQuizPatch, AlgoQuizQuestion, AlgoRoadmap,
    NewAlgoQuizOption, NewAlgoRoadmap,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct RoadmapRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0))]
    pub order: i32,
}

impl From<RoadmapRequest> for NewAlgoRoadmap {
    fn from(r: RoadmapRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            display_order: r.order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub order: i32,
    pub post_count: i32,
}

impl From<AlgoRoadmap> for RoadmapResponse {
    fn from(r: AlgoRoadmap) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            order: r.display_order,
            post_count: r.post_count,
        }
    }
}

/// Text fields of the multipart post form.
#[derive(Debug, Validate)]
pub struct PostFormFields {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    /// Absent keeps the current images; a list replaces them in order.
    pub image_urls: Option<Vec<String>>,
}

impl UpdatePostRequest {
    /// Validates fields and converts the request into a patch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on invalid fields or a non-HTTP image URL.
    pub fn into_patch(self) -> Result<AlgoPostPatch, AppError> {
        self.validate()?;

        if let Some(urls) = &self.image_urls {
            for raw in urls {
                let valid = Url::parse(raw)
                    .map(|u| matches!(u.scheme(), "http" | "https"))
                    .unwrap_or(false);
                if !valid {
                    return Err(AppError::bad_request(
                        "Invalid image URL",
                        json!({ "image_url": raw }),
                    ));
                }
            }
        }

        Ok(AlgoPostPatch {
            title: self.title,
            content: self.content,
            image_urls: self.image_urls,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub roadmap_id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AlgoPost> for PostResponse {
    fn from(p: AlgoPost) -> Self {
        Self {
            id: p.id,
            roadmap_id: p.roadmap_id,
            member_id: p.member_id,
            title: p.title,
            content: p.content,
            comment_count: p.comment_count,
            like_count: p.like_count,
            images: p.images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    pub id: i64,
    pub roadmap_id: i64,
    pub title: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<AlgoPostSummary> for PostSummaryResponse {
    fn from(p: AlgoPostSummary) -> Self {
        Self {
            id: p.id,
            roadmap_id: p.roadmap_id,
            title: p.title,
            comment_count: p.comment_count,
            like_count: p.like_count,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct QuizOptionRequest {
    #[validate(length(min = 1, max = 500))]
    pub content: String,

    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[validate(length(min = 2, max = 5))]
    #[validate(nested)]
    pub options: Vec<QuizOptionRequest>,
}

impl CreateQuizRequest {
    pub fn into_options(self) -> (String, Vec<NewAlgoQuizOption>) {
        let options = self
            .options
            .into_iter()
            .map(|o| NewAlgoQuizOption {
                content: o.content,
                is_correct: o.is_correct,
            })
            .collect();
        (self.question, options)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuizOptionRequest {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[serde(default)]
    pub options: Vec<UpdateQuizOptionRequest>,
}

impl From<UpdateQuizRequest> for AlgoQuizPatch {
    fn from(r: UpdateQuizRequest) -> Self {
        Self {
            question: r.question,
            options: r.options.into_iter().map(|o| (o.id, o.content)).collect(),
        }
    }
}

/// Quiz option as shown to members. The correct answer is never exposed.
#[derive(Debug, Serialize)]
pub struct QuizOptionResponse {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: i64,
    pub post_id: i64,
    pub question: String,
    pub options: Vec<QuizOptionResponse>,
}

impl From<AlgoQuizQuestion> for QuizResponse {
    fn from(q: AlgoQuizQuestion) -> Self {
        Self {
            id: q.id,
            post_id: q.post_id,
            question: q.question,
            options: q
                .options
                .into_iter()
                .map(|o| QuizOptionResponse {
                    id: o.id,
                    content: o.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub correct: bool,
}
