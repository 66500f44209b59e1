//! Domain layer containing business entities and repository contracts.
//!
//! This module defines entities and repository interfaces independent of
//! infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures and their invariants
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Counter bookkeeping (`comment_count`, `like_count`, `post_count`) is part of
//!   the repository contract: every write that changes a counted row adjusts the
//!   counter in the same transaction
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
