//! Todo items storage module for `DynamoDB` operations
//!
//! The items table is keyed by (`todoId`, `userId`). Listing a user's todos goes
//! through a global secondary index whose partition key is `userId`.

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    error::SdkError, operation::update_item::UpdateItemError, types::AttributeValue,
    Client as DynamoDbClient,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_items, to_item};
use strum::Display;

pub use error::{TodoStorageError, TodoStorageResult};

/// `DynamoDB` row for a single todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Owner of the todo
    pub user_id: String,
    /// Unique todo ID (UUID v4)
    pub todo_id: String,
    /// ISO-8601 timestamp of creation, never changes after insert
    pub created_at: String,
    /// Free text name of the todo
    pub name: String,
    /// Due date (ISO-8601 date)
    pub due_date: String,
    /// Whether the todo has been completed
    pub done: bool,
    /// Public URL of the attached image, set once an upload URL was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

/// Fields that can be changed on an existing todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    /// New name
    pub name: String,
    /// New due date
    pub due_date: String,
    /// New completion state
    pub done: bool,
}

/// `DynamoDB` attribute names for the todos table
#[derive(Debug, Display)]
#[strum(serialize_all = "camelCase")]
pub enum TodoAttribute {
    /// Owner ID (sort key, partition key of the owner index)
    UserId,
    /// Todo ID (partition key)
    TodoId,
    /// Creation timestamp
    CreatedAt,
    /// Todo name
    Name,
    /// Due date
    DueDate,
    /// Completion flag
    Done,
    /// Attachment URL
    AttachmentUrl,
}

/// Data access operations over the todos table
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Lists every todo owned by `user_id`, in no particular order.
    async fn get_all_by_user(&self, user_id: &str) -> TodoStorageResult<Vec<TodoItem>>;

    /// Inserts a todo and echoes it back.
    async fn create(&self, item: TodoItem) -> TodoStorageResult<TodoItem>;

    /// Deletes a todo. Deleting a missing todo is not an error.
    async fn delete(&self, todo_id: &str, user_id: &str) -> TodoStorageResult<()>;

    /// Overwrites name, due date and completion state, leaving every other
    /// attribute untouched.
    ///
    /// Returns `TodoStorageError::NotFound` if the todo does not exist for this user.
    async fn update(
        &self,
        todo_id: &str,
        user_id: &str,
        update: &TodoUpdate,
    ) -> TodoStorageResult<()>;

    /// Sets the attachment URL of an existing todo.
    ///
    /// Returns `TodoStorageError::NotFound` if the todo does not exist for this user.
    async fn set_attachment_url(
        &self,
        todo_id: &str,
        user_id: &str,
        attachment_url: &str,
    ) -> TodoStorageResult<()>;
}

/// Storage client for todo operations
pub struct TodoStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
    user_index_name: String,
}

impl TodoStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for todos
    /// * `user_index_name` - Name of the GSI for owner queries
    #[must_use]
    pub const fn new(
        dynamodb_client: Arc<DynamoDbClient>,
        table_name: String,
        user_index_name: String,
    ) -> Self {
        Self {
            dynamodb_client,
            table_name,
            user_index_name,
        }
    }

    fn map_update_error(err: SdkError<UpdateItemError>) -> TodoStorageError {
        if matches!(
            err,
            SdkError::ServiceError(ref svc) if svc.err().is_conditional_check_failed_exception()
        ) {
            TodoStorageError::NotFound
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl TodoStore for TodoStorage {
    async fn get_all_by_user(&self, user_id: &str) -> TodoStorageResult<Vec<TodoItem>> {
        tracing::debug!("Querying todos by user");

        let items = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.user_index_name)
            .key_condition_expression("#user_id = :user_id")
            .expression_attribute_names("#user_id", TodoAttribute::UserId.to_string())
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await?;

        Ok(from_items(items)?)
    }

    async fn create(&self, item: TodoItem) -> TodoStorageResult<TodoItem> {
        let row = to_item(&item)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(row))
            .send()
            .await?;

        Ok(item)
    }

    async fn delete(&self, todo_id: &str, user_id: &str) -> TodoStorageResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                TodoAttribute::TodoId.to_string(),
                AttributeValue::S(todo_id.to_string()),
            )
            .key(
                TodoAttribute::UserId.to_string(),
                AttributeValue::S(user_id.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }

    async fn update(
        &self,
        todo_id: &str,
        user_id: &str,
        update: &TodoUpdate,
    ) -> TodoStorageResult<()> {
        // The condition keeps the update from creating a partial row
        self.dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key(
                TodoAttribute::TodoId.to_string(),
                AttributeValue::S(todo_id.to_string()),
            )
            .key(
                TodoAttribute::UserId.to_string(),
                AttributeValue::S(user_id.to_string()),
            )
            .update_expression("SET #name = :name, #due_date = :due_date, #done = :done")
            .condition_expression("attribute_exists(#todo_id)")
            .expression_attribute_names("#todo_id", TodoAttribute::TodoId.to_string())
            .expression_attribute_names("#name", TodoAttribute::Name.to_string())
            .expression_attribute_names("#due_date", TodoAttribute::DueDate.to_string())
            .expression_attribute_names("#done", TodoAttribute::Done.to_string())
            .expression_attribute_values(":name", AttributeValue::S(update.name.clone()))
            .expression_attribute_values(":due_date", AttributeValue::S(update.due_date.clone()))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .send()
            .await
            .map_err(Self::map_update_error)?;

        Ok(())
    }

    async fn set_attachment_url(
        &self,
        todo_id: &str,
        user_id: &str,
        attachment_url: &str,
    ) -> TodoStorageResult<()> {
        self.dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key(
                TodoAttribute::TodoId.to_string(),
                AttributeValue::S(todo_id.to_string()),
            )
            .key(
                TodoAttribute::UserId.to_string(),
                AttributeValue::S(user_id.to_string()),
            )
            .update_expression("SET #attachment_url = :attachment_url")
            .condition_expression("attribute_exists(#todo_id)")
            .expression_attribute_names("#todo_id", TodoAttribute::TodoId.to_string())
            .expression_attribute_names(
                "#attachment_url",
                TodoAttribute::AttachmentUrl.to_string(),
            )
            .expression_attribute_values(
                ":attachment_url",
                AttributeValue::S(attachment_url.to_string()),
            )
            .send()
            .await
            .map_err(Self::map_update_error)?;

        Ok(())
    }
}
