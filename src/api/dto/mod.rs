//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod algo;
pub mod auth;
pub mod career;
pub mod coding;
pub mod comment;
pub mod health;
pub mod like;
pub mod member;
pub mod pagination;
pub mod study;
pub mod study_recruit;
