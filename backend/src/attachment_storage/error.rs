//! Error types for attachment operations

use thiserror::Error;

/// Result type for attachment operations
pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Errors that can occur while signing attachment URLs
#[derive(Error, Debug)]
pub enum AttachmentError {
    /// Presigning configuration could not be built
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The SDK failed to produce a presigned request
    #[error("Failed to presign S3 request: {0}")]
    PresignError(String),
}
