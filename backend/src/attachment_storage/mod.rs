//! S3-based attachment storage operations
//!
//! Each todo has at most one attachment, stored under the todo id as object key.
//! Clients upload and download it directly through presigned URLs.

mod error;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};

pub use error::{AttachmentError, AttachmentResult};

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Attachment storage client for S3 operations
pub struct AttachmentStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    presigned_url_expiry_secs: u64,
}

impl AttachmentStorage {
    /// Creates a new attachment storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for attachments
    /// * `presigned_url_expiry_secs` - Lifetime of generated presigned URLs in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        presigned_url_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            presigned_url_expiry_secs,
        }
    }

    /// Public URL of the attachment for a todo, independent of whether it was uploaded
    #[must_use]
    pub fn public_url(&self, todo_id: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{todo_id}", self.bucket_name)
    }

    /// Presigning config starting now, and the instant the signed URL stops working
    fn presigning_window(&self) -> AttachmentResult<(PresigningConfig, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_in = Duration::from_secs(self.presigned_url_expiry_secs);

        let config = PresigningConfig::builder()
            .start_time(SystemTime::from(now))
            .expires_in(expires_in)
            .build()
            .map_err(|e| {
                AttachmentError::ConfigError(format!("Failed to create presigning config: {e}"))
            })?;

        Ok((config, now + expires_in))
    }

    /// Generates a presigned URL for uploading the attachment of a todo
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError::ConfigError` if presigning config creation fails
    /// Returns `AttachmentError::PresignError` if presigned URL generation fails
    pub async fn generate_presigned_put_url(&self, todo_id: &str) -> AttachmentResult<PresignedUrl> {
        let (config, expires_at) = self.presigning_window()?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(todo_id)
            .presigned(config)
            .await
            .map_err(|e| AttachmentError::PresignError(e.to_string()))?;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at,
        })
    }

    /// Generates a presigned URL for downloading the attachment of a todo
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError::ConfigError` if presigning config creation fails
    /// Returns `AttachmentError::PresignError` if presigned URL generation fails
    pub async fn generate_presigned_get_url(&self, todo_id: &str) -> AttachmentResult<PresignedUrl> {
        let (config, expires_at) = self.presigning_window()?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(todo_id)
            .presigned(config)
            .await
            .map_err(|e| AttachmentError::PresignError(e.to_string()))?;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at,
        })
    }
}
