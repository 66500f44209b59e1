//! Uploads post images to object storage.

use serde_json::json;

use crate::domain::entities::ImageUpload;
use crate::error::AppError;
use crate::infrastructure::storage::ImageStorage;

/// Maximum number of images attached to one post.
pub const MAX_IMAGES_PER_POST: usize = 10;

/// Validates every image, then uploads them under `folder` in order.
///
/// Empty files are dropped. Nothing is uploaded unless all remaining images
/// pass validation.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for an invalid image or too many images,
/// and the storage error mapping for failed uploads.
pub async fn upload_images(
    storage: &dyn ImageStorage,
    folder: &str,
    images: Vec<ImageUpload>,
    max_bytes: usize,
) -> Result<Vec<String>, AppError> {
    let images: Vec<ImageUpload> = images.into_iter().filter(|i| !i.is_empty()).collect();

    if images.len() > MAX_IMAGES_PER_POST {
        return Err(AppError::bad_request(
            "Too many images",
            json!({ "max": MAX_IMAGES_PER_POST, "provided": images.len() }),
        ));
    }

    for image in &images {
        image.validate(max_bytes)?;
    }

    let mut urls = Vec::with_capacity(images.len());
    for image in images {
        urls.push(storage.upload(folder, image).await?);
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MockImageStorage;

    fn png(name: &str, len: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0; len],
        }
    }

    #[tokio::test]
    async fn test_upload_keeps_order() {
        let mut storage = MockImageStorage::new();
        storage
            .expect_upload()
            .withf(|folder, _| folder == "algo-posts")
            .times(2)
            .returning(|folder, image| Ok(format!("https://cdn.test/{}/{}", folder, image.file_name)));

        let urls = upload_images(&storage, "algo-posts", vec![png("a.png", 3), png("b.png", 3)], 10)
            .await
            .unwrap();

        assert_eq!(
            urls,
            vec![
                "https://cdn.test/algo-posts/a.png".to_string(),
                "https://cdn.test/algo-posts/b.png".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_files_are_skipped() {
        let mut storage = MockImageStorage::new();
        storage
            .expect_upload()
            .times(1)
            .returning(|folder, image| Ok(format!("https://cdn.test/{}/{}", folder, image.file_name)));

        let urls = upload_images(&storage, "coding-posts", vec![png("blank.png", 0), png("a.png", 3)], 10)
            .await
            .unwrap();

        assert_eq!(urls, vec!["https://cdn.test/coding-posts/a.png".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_image_uploads_nothing() {
        let mut storage = MockImageStorage::new();
        storage.expect_upload().never();

        let result = upload_images(&storage, "algo-posts", vec![png("a.png", 3), png("b.png", 64)], 10).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
