//! Todo business logic
//!
//! Thin layer over the stores: it assigns ids and timestamps to new entities
//! and ties the attachment bucket to the todos table.

mod error;

use std::sync::Arc;

use chrono::Utc;
use todo_storage::{
    comment::{CommentItem, CommentStore},
    todo::{TodoItem, TodoStore, TodoUpdate},
};
use uuid::Uuid;

use crate::attachment_storage::{AttachmentStorage, PresignedUrl};

pub use error::{TodoServiceError, TodoServiceResult};

/// Fields supplied by the caller when creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    /// Name of the todo
    pub name: String,
    /// Due date (ISO-8601 date)
    pub due_date: String,
}

/// Business operations over todos, their comments and attachments
pub struct TodoService {
    todo_store: Arc<dyn TodoStore>,
    comment_store: Arc<dyn CommentStore>,
    attachment_storage: Arc<AttachmentStorage>,
}

impl TodoService {
    /// Creates a new todo service
    #[must_use]
    pub fn new(
        todo_store: Arc<dyn TodoStore>,
        comment_store: Arc<dyn CommentStore>,
        attachment_storage: Arc<AttachmentStorage>,
    ) -> Self {
        Self {
            todo_store,
            comment_store,
            attachment_storage,
        }
    }

    /// Lists all todos of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the todos table cannot be queried
    pub async fn get_todos_for_user(&self, user_id: &str) -> TodoServiceResult<Vec<TodoItem>> {
        Ok(self.todo_store.get_all_by_user(user_id).await?)
    }

    /// Creates a new, not yet completed todo owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the todo cannot be stored
    pub async fn create_todo(
        &self,
        user_id: &str,
        request: CreateTodo,
    ) -> TodoServiceResult<TodoItem> {
        let item = TodoItem {
            user_id: user_id.to_string(),
            todo_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            name: request.name,
            due_date: request.due_date,
            done: false,
            attachment_url: None,
        };

        tracing::info!(todo_id = %item.todo_id, "Creating todo");
        Ok(self.todo_store.create(item).await?)
    }

    /// Overwrites the name, due date and completion flag of a todo
    ///
    /// # Errors
    ///
    /// Returns `TodoStorageError::NotFound` if the user owns no such todo
    pub async fn update_todo(
        &self,
        todo_id: &str,
        user_id: &str,
        update: &TodoUpdate,
    ) -> TodoServiceResult<()> {
        Ok(self.todo_store.update(todo_id, user_id, update).await?)
    }

    /// Deletes a todo and every comment attached to it
    ///
    /// The comments are purged even when deleting the todo itself failed.
    ///
    /// # Errors
    ///
    /// Returns the first error of the two steps
    pub async fn delete_todo(&self, todo_id: &str, user_id: &str) -> TodoServiceResult<()> {
        let todo_result = self.todo_store.delete(todo_id, user_id).await;
        let comments_result = self.comment_store.delete_all_by_todo(todo_id).await;

        todo_result?;
        comments_result?;
        Ok(())
    }

    /// Signs an upload URL for the attachment of a todo and records its public URL
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails, or `TodoStorageError::NotFound` if the
    /// user owns no such todo
    pub async fn create_upload_url(
        &self,
        todo_id: &str,
        user_id: &str,
    ) -> TodoServiceResult<PresignedUrl> {
        let presigned = self
            .attachment_storage
            .generate_presigned_put_url(todo_id)
            .await?;

        self.todo_store
            .set_attachment_url(todo_id, user_id, &self.attachment_storage.public_url(todo_id))
            .await?;

        Ok(presigned)
    }

    /// Signs a download URL for the attachment of a todo
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails
    pub async fn create_image_url(&self, todo_id: &str) -> TodoServiceResult<PresignedUrl> {
        Ok(self
            .attachment_storage
            .generate_presigned_get_url(todo_id)
            .await?)
    }

    /// Adds a comment by `user_id` to a todo
    ///
    /// # Errors
    ///
    /// Returns an error if the comment cannot be stored
    pub async fn create_comment(
        &self,
        todo_id: &str,
        user_id: &str,
        comment: String,
    ) -> TodoServiceResult<CommentItem> {
        let item = CommentItem {
            todo_id: todo_id.to_string(),
            comment_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            comment,
            created_at: Utc::now().to_rfc3339(),
        };

        Ok(self.comment_store.create(item).await?)
    }

    /// Lists the comments of a todo
    ///
    /// # Errors
    ///
    /// Returns an error if the comments table cannot be queried
    pub async fn get_comments(&self, todo_id: &str) -> TodoServiceResult<Vec<CommentItem>> {
        Ok(self.comment_store.get_all_by_todo(todo_id).await?)
    }

    /// Deletes a single comment
    ///
    /// # Errors
    ///
    /// Returns an error if the comment cannot be deleted
    pub async fn delete_comment(&self, comment_id: &str, todo_id: &str) -> TodoServiceResult<()> {
        Ok(self.comment_store.delete(comment_id, todo_id).await?)
    }
}
