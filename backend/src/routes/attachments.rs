use std::sync::Arc;

use axum::{extract::Path, Extension};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::instrument;

use super::TodoPath;
use crate::{
    attachment_storage::PresignedUrl,
    middleware::AuthenticatedUser,
    todo_service::TodoService,
    types::{ApiResponse, AppError},
};

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentUrlResponse {
    /// Presigned S3 URL for the attachment object
    pub upload_url: String,
    /// ISO-8601 UTC
    pub expires_at: String,
}

impl From<PresignedUrl> for AttachmentUrlResponse {
    fn from(presigned: PresignedUrl) -> Self {
        Self {
            upload_url: presigned.url,
            expires_at: presigned.expires_at.to_rfc3339(),
        }
    }
}

/// Returns a URL the attachment of a todo can be `PUT` to
///
/// The todo's `attachmentUrl` is set as part of the call.
#[instrument(skip(todo_service))]
pub async fn create_upload_url(
    Extension(todo_service): Extension<Arc<TodoService>>,
    user: AuthenticatedUser,
    Path(TodoPath { todo_id }): Path<TodoPath>,
) -> Result<ApiResponse<AttachmentUrlResponse>, AppError> {
    let presigned = todo_service
        .create_upload_url(&todo_id, &user.user_id)
        .await?;

    Ok(ApiResponse::ok(presigned.into()))
}

/// Returns a URL the attachment of a todo can be downloaded from
#[instrument(skip(todo_service))]
pub async fn create_image_url(
    Extension(todo_service): Extension<Arc<TodoService>>,
    Path(TodoPath { todo_id }): Path<TodoPath>,
) -> Result<ApiResponse<AttachmentUrlResponse>, AppError> {
    let presigned = todo_service.create_image_url(&todo_id).await?;

    Ok(ApiResponse::ok(presigned.into()))
}
