use std::sync::Arc;

use axum::{extract::Path, Extension};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use todo_storage::comment::CommentItem;
use tracing::instrument;

use super::{CommentPath, TodoPath};
use crate::{
    middleware::AuthenticatedUser,
    todo_service::TodoService,
    types::{ApiResponse, AppError, JsonBody},
};

/// Request to comment on a todo
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCommentRequest {
    /// Free text
    pub comment: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CommentResponse {
    pub item: CommentItem,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CommentListResponse {
    pub items: Vec<CommentItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentResponse {
    /// ID of the comment that was requested to be deleted
    pub deleted_comment: String,
}

/// Adds a comment by the authenticated user to a todo
#[instrument(skip(todo_service, payload))]
pub async fn create_comment(
    Extension(todo_service): Extension<Arc<TodoService>>,
    user: AuthenticatedUser,
    Path(TodoPath { todo_id }): Path<TodoPath>,
    JsonBody(payload): JsonBody<CreateCommentRequest>,
) -> Result<ApiResponse<CommentResponse>, AppError> {
    let item = todo_service
        .create_comment(&todo_id, &user.user_id, payload.comment)
        .await?;

    Ok(ApiResponse::created(CommentResponse { item }))
}

/// Lists the comments of a todo
#[instrument(skip(todo_service))]
pub async fn get_comments(
    Extension(todo_service): Extension<Arc<TodoService>>,
    Path(TodoPath { todo_id }): Path<TodoPath>,
) -> Result<ApiResponse<CommentListResponse>, AppError> {
    let items = todo_service.get_comments(&todo_id).await?;

    Ok(ApiResponse::ok(CommentListResponse { items }))
}

/// Deletes a comment
///
/// Always answers `204`; failures are only logged.
#[instrument(skip(todo_service))]
pub async fn delete_comment(
    Extension(todo_service): Extension<Arc<TodoService>>,
    Path(CommentPath {
        todo_id,
        comment_id,
    }): Path<CommentPath>,
) -> ApiResponse<DeleteCommentResponse> {
    if let Err(e) = todo_service.delete_comment(&comment_id, &todo_id).await {
        tracing::error!("Failed to delete comment: {e}");
    }

    ApiResponse::no_content(DeleteCommentResponse {
        deleted_comment: comment_id,
    })
}
