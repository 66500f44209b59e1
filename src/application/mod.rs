//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and ownership rules.
//! They consume repository traits and receive the authenticated [`Actor`]
//! from the HTTP layer.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and bearer tokens
//! - [`services::member_service::MemberService`] - Member profiles
//! - [`services::algo_service::AlgoService`] - Algorithm roadmaps, posts and quizzes
//! - [`services::coding_service::CodingService`] - Coding problems, solution posts and feedback
//! - [`services::like_service::LikeService`] - Likes and author points
//! - [`services::study_recruit_service::StudyRecruitService`] - Study recruitment
//! - [`services::study_service::StudyService`] - Study groups and roadmaps
//! - [`services::career_service::CareerService`] - Career information board
//!
//! [`Actor`]: crate::domain::entities::Actor

pub mod services;
