//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod algo;
pub mod auth;
pub mod career;
pub mod coding;
pub mod health;
pub mod members;
pub mod multipart;
pub mod study;
pub mod study_recruit;

pub use health::health_handler;
