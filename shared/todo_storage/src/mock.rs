//! In-memory stores used by tests of crates built on top of this one

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;

use crate::comment::{
    CommentAttribute, CommentItem, CommentStorage, CommentStorageError, CommentStorageResult,
    CommentStore,
};
use crate::todo::{TodoItem, TodoStorageError, TodoStorageResult, TodoStore, TodoUpdate};

const SIMULATED_OUTAGE: &str = "simulated DynamoDB outage";

/// Todos kept in a map keyed by (`todo_id`, `user_id`)
#[derive(Default)]
pub struct InMemoryTodoStore {
    items: Mutex<HashMap<(String, String), TodoItem>>,
    fail_deletes: bool,
}

impl InMemoryTodoStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose deletes always fail
    #[must_use]
    pub fn with_failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    /// Returns the stored todo, if any
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned
    #[must_use]
    pub fn get(&self, todo_id: &str, user_id: &str) -> Option<TodoItem> {
        self.items
            .lock()
            .unwrap()
            .get(&(todo_id.to_string(), user_id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn get_all_by_user(&self, user_id: &str) -> TodoStorageResult<Vec<TodoItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, item: TodoItem) -> TodoStorageResult<TodoItem> {
        self.items.lock().unwrap().insert(
            (item.todo_id.clone(), item.user_id.clone()),
            item.clone(),
        );
        Ok(item)
    }

    async fn delete(&self, todo_id: &str, user_id: &str) -> TodoStorageResult<()> {
        if self.fail_deletes {
            return Err(TodoStorageError::DynamoDbDeleteError(
                SdkError::timeout_error(SIMULATED_OUTAGE),
            ));
        }

        self.items
            .lock()
            .unwrap()
            .remove(&(todo_id.to_string(), user_id.to_string()));
        Ok(())
    }

    async fn update(
        &self,
        todo_id: &str,
        user_id: &str,
        update: &TodoUpdate,
    ) -> TodoStorageResult<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(&(todo_id.to_string(), user_id.to_string()))
            .ok_or(TodoStorageError::NotFound)?;

        item.name.clone_from(&update.name);
        item.due_date.clone_from(&update.due_date);
        item.done = update.done;
        Ok(())
    }

    async fn set_attachment_url(
        &self,
        todo_id: &str,
        user_id: &str,
        attachment_url: &str,
    ) -> TodoStorageResult<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(&(todo_id.to_string(), user_id.to_string()))
            .ok_or(TodoStorageError::NotFound)?;

        item.attachment_url = Some(attachment_url.to_string());
        Ok(())
    }
}

/// Comments kept in a map keyed by `comment_id`
///
/// Bulk deletes go through [`CommentStorage::build_delete_batches`], the same
/// chunking the `DynamoDB` store sends, and the size of every batch is recorded
/// so tests can assert on batching.
#[derive(Default)]
pub struct InMemoryCommentStore {
    items: Mutex<HashMap<String, CommentItem>>,
    delete_batches: Mutex<Vec<usize>>,
    fail_deletes: bool,
}

impl InMemoryCommentStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose deletes always fail
    #[must_use]
    pub fn with_failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    /// Sizes of the bulk-delete batches issued so far
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned
    #[must_use]
    pub fn delete_batches(&self) -> Vec<usize> {
        self.delete_batches.lock().unwrap().clone()
    }

    /// Number of comments currently stored, across all todos
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Whether no comment is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn simulated_failure() -> CommentStorageError {
        CommentStorageError::DynamoDbDeleteError(SdkError::timeout_error(SIMULATED_OUTAGE))
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn create(&self, item: CommentItem) -> CommentStorageResult<CommentItem> {
        self.items
            .lock()
            .unwrap()
            .insert(item.comment_id.clone(), item.clone());
        Ok(item)
    }

    async fn get_all_by_todo(&self, todo_id: &str) -> CommentStorageResult<Vec<CommentItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.todo_id == todo_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, comment_id: &str, todo_id: &str) -> CommentStorageResult<()> {
        if self.fail_deletes {
            return Err(Self::simulated_failure());
        }

        let mut items = self.items.lock().unwrap();
        if items
            .get(comment_id)
            .is_some_and(|item| item.todo_id == todo_id)
        {
            items.remove(comment_id);
        }
        Ok(())
    }

    async fn delete_all_by_todo(&self, todo_id: &str) -> CommentStorageResult<()> {
        if self.fail_deletes {
            return Err(Self::simulated_failure());
        }

        let comments = self.get_all_by_todo(todo_id).await?;
        let batches = CommentStorage::build_delete_batches(&comments)?;

        let mut items = self.items.lock().unwrap();
        for request in batches.iter().flatten() {
            if let Some(comment_id) = request
                .delete_request()
                .and_then(|delete| delete.key().get(&CommentAttribute::CommentId.to_string()))
                .and_then(|key| key.as_s().ok())
            {
                items.remove(comment_id);
            }
        }
        self.delete_batches
            .lock()
            .unwrap()
            .extend(batches.iter().map(Vec::len));
        Ok(())
    }
}
