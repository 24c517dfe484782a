//! Error types for todo service operations

use thiserror::Error;
use todo_storage::{comment::CommentStorageError, todo::TodoStorageError};

use crate::attachment_storage::AttachmentError;

/// Result alias for todo service operations
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Errors surfaced by [`super::TodoService`]
#[derive(Error, Debug)]
pub enum TodoServiceError {
    /// Todos table failure
    #[error(transparent)]
    Todo(#[from] TodoStorageError),
    /// Comments table failure
    #[error(transparent)]
    Comment(#[from] CommentStorageError),
    /// URL signing failure
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}
