//! Core domain entities representing the community data model.
//!
//! Entities are plain data structures; the few rules that belong to the data
//! itself (quiz option constraints, comment threading, upload limits, study
//! schedules) live next to them as small validation methods.
//!
//! # Entity Types
//!
//! - [`Member`] - A registered member with rank and role
//! - [`AlgoRoadmap`], [`AlgoPost`], [`AlgoQuizQuestion`] - Algorithm learning content
//! - [`CodingProblem`], [`CodingPost`] - Coding problem solutions with AI feedback
//! - [`StudyRecruitPost`], [`StudyRecruitApplicant`] - Study recruitment
//! - [`Study`], [`StudyRoadmapDetail`] - Study groups and their roadmaps
//! - [`CareerPost`] - Career information posts
//! - [`Comment`] - Comments shared by every board
//! - [`Like`] - Post recommendations
//!
//! # Design Pattern
//!
//! Separate structs are used for creation (`NewAlgoPost`, `NewComment`, ...)
//! and partial updates (`AlgoPostPatch`, `AlgoQuizPatch`).

pub mod algo;
pub mod career;
pub mod coding;
pub mod comment;
pub mod image;
pub mod like;
pub mod member;
pub mod study;
pub mod study_recruit;

pub use algo::{
    AlgoPost, AlgoPostPatch, AlgoPostSummary, AlgoQuizOption, AlgoQuizPatch, AlgoQuizQuestion,
    AlgoRoadmap, MAX_QUIZ_OPTIONS, MIN_QUIZ_OPTIONS, NewAlgoPost, NewAlgoQuiz, NewAlgoQuizOption,
    NewAlgoRoadmap,
};
pub use career::{CareerPost, NewCareerPost};
pub use coding::{
    AiFeedback, CodingPost, CodingPostSummary, CodingProblem, FeedbackRequest, NewCodingPost,
    NewCodingProblem,
};
pub use comment::{
    Comment, CommentView, MAX_COMMENT_LENGTH, NewComment, validate_comment_content,
    validate_reply_parent,
};
pub use image::{DEFAULT_MAX_IMAGE_BYTES, ImageUpload};
pub use like::{Like, LikeTarget, LikeablePost, POINTS_PER_LIKE};
pub use member::{
    Actor, DEFAULT_RANK_ID, Member, MemberCredentials, MemberRole, MemberStatus, NewMember,
    PostSummary,
};
pub use study::{
    MilestoneInfo, NewMilestone, NewStudy, NewStudyRoadmap, Study, StudyRoadmapDetail, StudyRole,
};
pub use study_recruit::{
    ApplicantStatus, MAX_CAPACITY, MIN_CAPACITY, RecruitStatus, StudyRecruitApplicant,
    StudyRecruitDetail, StudyRecruitPost, StudyRecruitPostInput, StudyRecruitSummary,
};
