//! Object storage for post images.
//!
//! Provides an [`ImageStorage`] trait with two implementations:
//! - [`S3Storage`] - AWS S3 (or any S3-compatible endpoint)
//! - [`NullStorage`] - Rejects uploads when no bucket is configured

mod null_storage;
mod s3_storage;
mod service;

pub use null_storage::NullStorage;
pub use s3_storage::{S3Settings, S3Storage};
pub use service::{ImageStorage, StorageError, object_key};

#[cfg(test)]
pub use service::MockImageStorage;
