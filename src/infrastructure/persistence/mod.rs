//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs. Multi-row writes that touch a
//! denormalized counter run inside one transaction.
//!
//! # Repositories
//!
//! - [`PgMemberRepository`] - Member accounts and ranks
//! - [`PgTokenRepository`] - Access token storage and validation
//! - [`PgAlgoRepository`] - Roadmaps, algorithm posts and quizzes
//! - [`PgCodingRepository`] - Coding problems and solution posts
//! - [`PgCommentRepository`] - Comments, one instance per board
//! - [`PgLikeRepository`] - Likes with point and rank bookkeeping
//! - [`PgStudyRecruitRepository`] - Recruitment posts and applicants
//! - [`PgStudyRepository`] - Study groups and roadmaps
//! - [`PgCareerRepository`] - Career information posts

pub mod pg_algo_repository;
pub mod pg_career_repository;
pub mod pg_coding_repository;
pub mod pg_comment_repository;
pub mod pg_like_repository;
pub mod pg_member_repository;
pub mod pg_study_recruit_repository;
pub mod pg_study_repository;
pub mod pg_token_repository;

pub use pg_algo_repository::PgAlgoRepository;
pub use pg_career_repository::PgCareerRepository;
pub use pg_coding_repository::PgCodingRepository;
pub use pg_comment_repository::PgCommentRepository;
pub use pg_like_repository::PgLikeRepository;
pub use pg_member_repository::PgMemberRepository;
pub use pg_study_recruit_repository::PgStudyRecruitRepository;
pub use pg_study_repository::PgStudyRepository;
pub use pg_token_repository::PgTokenRepository;
