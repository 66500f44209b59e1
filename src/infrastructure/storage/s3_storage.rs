//! S3-backed image storage.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{info, warn};

use super::service::{ImageStorage, StorageError, object_key};
use crate::domain::entities::ImageUpload;

/// Connection settings for an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Custom endpoint for S3-compatible stores (MinIO, R2); enables path-style addressing.
    pub endpoint: Option<String>,
    /// Base URL used to build public object URLs; defaults to the AWS virtual-host URL.
    pub public_url: Option<String>,
}

/// Uploads images to an S3 bucket and returns their public URLs.
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    pub fn new(settings: S3Settings) -> Self {
        let credentials = aws_sdk_s3::config::Credentials::new(
            settings.access_key,
            settings.secret_key,
            None,
            None,
            "static",
        );

        let mut config_builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(settings.region.clone()))
            .credentials_provider(credentials);

        if let Some(ep) = &settings.endpoint {
            config_builder = config_builder.endpoint_url(ep).force_path_style(true);
        }

        let client = aws_sdk_s3::Client::from_conf(config_builder.build());

        let public_base = match (&settings.public_url, &settings.endpoint) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(ep)) => format!("{}/{}", ep.trim_end_matches('/'), settings.bucket),
            (None, None) => format!(
                "https://{}.s3.{}.amazonaws.com",
                settings.bucket, settings.region
            ),
        };

        info!(bucket = %settings.bucket, "Image storage enabled (S3)");

        Self {
            client,
            bucket: settings.bucket,
            public_base,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

#[async_trait]
impl ImageStorage for S3Storage {
    async fn upload(&self, folder: &str, image: ImageUpload) -> Result<String, StorageError> {
        let key = object_key(folder, &image);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&image.content_type)
            .body(ByteStream::from(image.bytes))
            .send()
            .await
            .map_err(|e| {
                warn!(key = %key, "S3 upload failed: {}", e);
                StorageError::Upload(e.to_string())
            })?;

        Ok(self.public_url(&key))
    }

    fn is_enabled(&self) -> bool {
        true
    }

    async fn health_check(&self) -> bool {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
    }
}
