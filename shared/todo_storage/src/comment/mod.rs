//! Comments storage module for `DynamoDB` operations
//!
//! Comments are keyed by (`commentId`, `todoId`) and reach their todo through a
//! global secondary index on `todoId`. Nothing in the table enforces that the
//! referenced todo exists.

mod error;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use futures::future::try_join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_items, to_item};
use strum::Display;

pub use error::{CommentStorageError, CommentStorageResult};

/// `DynamoDB` caps a single batch write at 25 requests
pub const BATCH_WRITE_LIMIT: usize = 25;

/// `DynamoDB` row for a single comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    /// Todo the comment refers to
    pub todo_id: String,
    /// Unique comment ID (UUID v4)
    pub comment_id: String,
    /// Author of the comment
    pub user_id: String,
    /// Free text
    pub comment: String,
    /// ISO-8601 timestamp of creation
    pub created_at: String,
}

/// `DynamoDB` attribute names for the comments table
#[derive(Debug, Display)]
#[strum(serialize_all = "camelCase")]
pub enum CommentAttribute {
    /// Todo ID (sort key, partition key of the todo index)
    TodoId,
    /// Comment ID (partition key)
    CommentId,
    /// Author ID
    UserId,
    /// Comment text
    Comment,
    /// Creation timestamp
    CreatedAt,
}

/// Data access operations over the comments table
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Inserts a comment and echoes it back.
    async fn create(&self, item: CommentItem) -> CommentStorageResult<CommentItem>;

    /// Lists every comment attached to `todo_id`, in no particular order.
    async fn get_all_by_todo(&self, todo_id: &str) -> CommentStorageResult<Vec<CommentItem>>;

    /// Deletes a single comment. Deleting a missing comment is not an error.
    async fn delete(&self, comment_id: &str, todo_id: &str) -> CommentStorageResult<()>;

    /// Deletes every comment attached to `todo_id`.
    ///
    /// Batches are issued concurrently. A failing batch fails the whole call,
    /// batches that already went through stay deleted.
    async fn delete_all_by_todo(&self, todo_id: &str) -> CommentStorageResult<()>;
}

/// Storage client for comment operations
pub struct CommentStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
    todo_index_name: String,
}

impl CommentStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for comments
    /// * `todo_index_name` - Name of the GSI for todo queries
    #[must_use]
    pub const fn new(
        dynamodb_client: Arc<DynamoDbClient>,
        table_name: String,
        todo_index_name: String,
    ) -> Self {
        Self {
            dynamodb_client,
            table_name,
            todo_index_name,
        }
    }

    /// Splits the comments into batch-write payloads of at most
    /// [`BATCH_WRITE_LIMIT`] delete requests each
    ///
    /// # Errors
    ///
    /// Returns `CommentStorageError::SerializationError` if a delete request cannot be built
    pub fn build_delete_batches(
        comments: &[CommentItem],
    ) -> CommentStorageResult<Vec<Vec<WriteRequest>>> {
        comments
            .chunks(BATCH_WRITE_LIMIT)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(Self::build_delete_request)
                    .collect::<CommentStorageResult<Vec<_>>>()
            })
            .collect()
    }

    /// Builds a delete request for a comment
    fn build_delete_request(comment: &CommentItem) -> CommentStorageResult<WriteRequest> {
        let key = HashMap::from([
            (
                CommentAttribute::CommentId.to_string(),
                AttributeValue::S(comment.comment_id.clone()),
            ),
            (
                CommentAttribute::TodoId.to_string(),
                AttributeValue::S(comment.todo_id.clone()),
            ),
        ]);

        Ok(WriteRequest::builder()
            .delete_request(
                DeleteRequest::builder()
                    .set_key(Some(key))
                    .build()
                    .map_err(|e| {
                        CommentStorageError::SerializationError(format!(
                            "Failed to build delete request: {e:?}",
                        ))
                    })?,
            )
            .build())
    }
}

#[async_trait]
impl CommentStore for CommentStorage {
    async fn create(&self, item: CommentItem) -> CommentStorageResult<CommentItem> {
        let row = to_item(&item)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(row))
            .send()
            .await?;

        Ok(item)
    }

    async fn get_all_by_todo(&self, todo_id: &str) -> CommentStorageResult<Vec<CommentItem>> {
        tracing::debug!("Querying comments by todo");

        let items = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.todo_index_name)
            .key_condition_expression("#todo_id = :todo_id")
            .expression_attribute_names("#todo_id", CommentAttribute::TodoId.to_string())
            .expression_attribute_values(":todo_id", AttributeValue::S(todo_id.to_string()))
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await?;

        Ok(from_items(items)?)
    }

    async fn delete(&self, comment_id: &str, todo_id: &str) -> CommentStorageResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                CommentAttribute::CommentId.to_string(),
                AttributeValue::S(comment_id.to_string()),
            )
            .key(
                CommentAttribute::TodoId.to_string(),
                AttributeValue::S(todo_id.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }

    async fn delete_all_by_todo(&self, todo_id: &str) -> CommentStorageResult<()> {
        let comments = self.get_all_by_todo(todo_id).await?;

        if comments.is_empty() {
            return Ok(());
        }

        let batches = Self::build_delete_batches(&comments)?;
        tracing::info!(
            comments = comments.len(),
            batches = batches.len(),
            "Deleting comments of todo"
        );

        let writes = batches.into_iter().map(|write_requests| {
            self.dynamodb_client
                .batch_write_item()
                .request_items(&self.table_name, write_requests)
                .send()
        });

        let responses = try_join_all(writes).await?;

        let unprocessed: usize = responses
            .iter()
            .filter_map(|response| response.unprocessed_items())
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum();

        if unprocessed > 0 {
            tracing::warn!(unprocessed, "Some comments were left unprocessed by DynamoDB");
        }

        Ok(())
    }
}
