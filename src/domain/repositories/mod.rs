//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`MemberRepository`] - Member accounts and ranks
//! - [`TokenRepository`] - Access token authentication
//! - [`AlgoRepository`] - Algorithm roadmaps, posts and quizzes
//! - [`CodingRepository`] - Coding problems and solution posts
//! - [`CommentRepository`] - Comments, one instance per board
//! - [`LikeRepository`] - Likes with counter and point bookkeeping
//! - [`StudyRecruitRepository`] - Study recruitment posts and applicants
//! - [`StudyRepository`] - Study groups and roadmaps
//! - [`CareerRepository`] - Career information posts
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod algo_repository;
pub mod career_repository;
pub mod coding_repository;
pub mod comment_repository;
pub mod like_repository;
pub mod member_repository;
pub mod study_recruit_repository;
pub mod study_repository;
pub mod token_repository;

pub use algo_repository::AlgoRepository;
pub use career_repository::CareerRepository;
pub use coding_repository::CodingRepository;
pub use comment_repository::CommentRepository;
pub use like_repository::LikeRepository;
pub use member_repository::MemberRepository;
pub use study_recruit_repository::StudyRecruitRepository;
pub use study_repository::StudyRepository;
pub use token_repository::{AccessToken, TokenOwner, TokenRepository};

#[cfg(test)]
pub use algo_repository::MockAlgoRepository;
#[cfg(test)]
pub use career_repository::MockCareerRepository;
#[cfg(test)]
pub use coding_repository::MockCodingRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use like_repository::MockLikeRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use study_recruit_repository::MockStudyRecruitRepository;
#[cfg(test)]
pub use study_repository::MockStudyRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
