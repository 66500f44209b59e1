//! Image storage trait and error types.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde_json::json;

use crate::domain::entities::ImageUpload;
use crate::error::AppError;

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("image storage is not configured")]
    Disabled,
    #[error("storage upload failed: {0}")]
    Upload(String),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Disabled => AppError::bad_request(
                "Image uploads are disabled",
                json!({ "hint": "Configure S3_BUCKET to enable uploads" }),
            ),
            StorageError::Upload(reason) => {
                AppError::upstream("Image upload failed", json!({ "reason": reason }))
            }
        }
    }
}

/// Builds a collision-resistant object key: `<folder>/<millis>-<random>.<ext>`.
pub fn object_key(folder: &str, upload: &ImageUpload) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    let suffix: String = (0..12)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();

    let ext = upload.extension().unwrap_or_else(|| "bin".to_string());

    format!(
        "{}/{}-{}.{}",
        folder.trim_matches('/'),
        Utc::now().timestamp_millis(),
        suffix,
        ext
    )
}

/// Storage backend for user-uploaded images.
///
/// Callers validate uploads with [`ImageUpload::validate`] before storing them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Stores the image under `folder` and returns its public URL.
    async fn upload(&self, folder: &str, image: ImageUpload) -> Result<String, StorageError>;

    /// Whether uploads are possible at all.
    fn is_enabled(&self) -> bool;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let upload = ImageUpload {
            file_name: "Tree.PNG".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };

        let key = object_key("/coding-posts/", &upload);

        assert!(key.starts_with("coding-posts/"));
        assert!(key.ends_with(".png"));
        assert_ne!(key, object_key("coding-posts", &upload));
    }

    #[test]
    fn test_storage_error_mapping() {
        let disabled: AppError = StorageError::Disabled.into();
        assert!(matches!(disabled, AppError::Validation { .. }));

        let failed: AppError = StorageError::Upload("timeout".to_string()).into();
        assert!(matches!(failed, AppError::Upstream { .. }));
    }
}
