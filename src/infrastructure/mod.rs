//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and third-party services.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`feedback`] - Solution review service client
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`storage`] - Image storage (S3 and disabled implementations)

pub mod cache;
pub mod feedback;
pub mod persistence;
pub mod storage;
