//! Uploaded image payloads attached to posts.

use serde_json::json;

use crate::error::AppError;

/// Default upload limit (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// A single image received from a multipart form, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased file extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Checks size, MIME type and extension.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the file is larger than
    /// `max_bytes`, not an `image/*` type, or has an unsupported extension.
    /// Empty files are skipped by callers and never reach this check.
    pub fn validate(&self, max_bytes: usize) -> Result<(), AppError> {
        if self.bytes.len() > max_bytes {
            return Err(AppError::bad_request(
                "Image file is too large",
                json!({
                    "file_name": self.file_name,
                    "max_bytes": max_bytes,
                    "provided_bytes": self.bytes.len(),
                }),
            ));
        }

        if !self.content_type.starts_with("image/") {
            return Err(AppError::bad_request(
                "Only image files can be uploaded",
                json!({ "file_name": self.file_name, "content_type": self.content_type }),
            ));
        }

        match self.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(AppError::bad_request(
                "Unsupported image extension",
                json!({ "file_name": self.file_name, "allowed": ALLOWED_EXTENSIONS }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str, len: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0u8; len],
        }
    }

    #[test]
    fn test_valid_png() {
        assert!(upload("graph.PNG", "image/png", 128).validate(1024).is_ok());
    }

    #[test]
    fn test_oversized_file_rejected() {
        assert!(upload("graph.png", "image/png", 2048).validate(1024).is_err());
    }

    #[test]
    fn test_non_image_rejected() {
        assert!(upload("notes.pdf", "application/pdf", 10).validate(1024).is_err());
        assert!(upload("script.sh", "image/png", 10).validate(1024).is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(upload("a.b.JPEG", "image/jpeg", 1).extension().as_deref(), Some("jpeg"));
        assert_eq!(upload("noext", "image/jpeg", 1).extension(), None);
    }
}
