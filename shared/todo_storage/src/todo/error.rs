//! Error types for todo storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemError, put_item::PutItemError, query::QueryError,
    update_item::UpdateItemError,
};
use thiserror::Error;

/// Result type alias for todo storage operations
pub type TodoStorageResult<T> = Result<T, TodoStorageError>;

/// Storage error types for todo operations
#[derive(Debug, Error)]
pub enum TodoStorageError {
    /// Failed to insert todo into `DynamoDB`
    #[error("Failed to insert todo into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to query todos from `DynamoDB`
    #[error("Failed to query todos from DynamoDB: {0:?}")]
    DynamoDbQueryError(#[from] SdkError<QueryError>),

    /// Failed to update todo in `DynamoDB`
    #[error("Failed to update todo in DynamoDB: {0:?}")]
    DynamoDbUpdateError(#[from] SdkError<UpdateItemError>),

    /// Failed to delete todo from `DynamoDB`
    #[error("Failed to delete todo from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// No todo with the given id belongs to the given user
    #[error("Todo not found")]
    NotFound,

    /// Failed to parse todo from `DynamoDB` item
    #[error("Failed to parse todo: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for TodoStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
