//! Parsing of `multipart/form-data` post forms with image attachments.

use std::collections::HashMap;

use axum::extract::Multipart;
use serde_json::json;

use crate::domain::entities::ImageUpload;
use crate::error::AppError;

/// Text fields and image files of a multipart form.
///
/// Any part carrying a file name is treated as an image; file parts without
/// content are skipped.
#[derive(Debug, Default)]
pub struct PostForm {
    fields: HashMap<String, String>,
    pub images: Vec<ImageUpload>,
}

impl PostForm {
    /// Reads every part of the form into memory.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the body is not valid multipart or
    /// a text field is not UTF-8.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(invalid_body)?;

                if bytes.is_empty() {
                    continue;
                }

                form.images.push(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field.text().await.map_err(invalid_body)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Removes and returns a text field, empty string if absent.
    pub fn take_text(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// Parses a required integer field.
    pub fn id(&self, name: &str) -> Result<i64, AppError> {
        self.fields
            .get(name)
            .and_then(|v| v.trim().parse().ok())
            .ok_or_else(|| {
                AppError::bad_request(
                    "Missing or invalid form field",
                    json!({ "field": name }),
                )
            })
    }
}

fn invalid_body(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::bad_request("Invalid multipart body", json!({ "reason": e.body_text() }))
}
