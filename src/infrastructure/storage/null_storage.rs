//! Storage used when no bucket is configured.

use super::service::{ImageStorage, StorageError};
use crate::domain::entities::ImageUpload;
use async_trait::async_trait;

/// Refuses every upload. Posts without images keep working.
#[derive(Default)]
pub struct NullStorage;

impl NullStorage {
    pub fn new() -> Self {
        tracing::debug!("Using NullStorage (image uploads disabled)");
        Self
    }
}

#[async_trait]
impl ImageStorage for NullStorage {
    async fn upload(&self, _folder: &str, _image: ImageUpload) -> Result<String, StorageError> {
        Err(StorageError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn health_check(&self) -> bool {
        true
    }
}
