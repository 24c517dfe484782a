use std::sync::Arc;

use axum::{extract::Path, Extension};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use todo_storage::todo::{TodoItem, TodoUpdate};
use tracing::instrument;

use super::TodoPath;
use crate::{
    middleware::AuthenticatedUser,
    todo_service::{CreateTodo, TodoService},
    types::{ApiResponse, AppError, JsonBody},
};

/// Request to create a new todo
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// Name of the todo
    pub name: String,
    /// Due date (ISO-8601 date)
    pub due_date: String,
}

/// Request to update an existing todo
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    /// New name
    pub name: String,
    /// New due date (ISO-8601 date)
    pub due_date: String,
    /// Whether the todo is completed
    pub done: bool,
}

impl From<UpdateTodoRequest> for TodoUpdate {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            name: request.name,
            due_date: request.due_date,
            done: request.done,
        }
    }
}

/// A single todo
#[derive(Debug, Serialize, JsonSchema)]
pub struct TodoResponse {
    pub item: TodoItem,
}

/// All todos of the caller
#[derive(Debug, Serialize, JsonSchema)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
}

/// Empty acknowledgement
#[derive(Debug, Serialize, JsonSchema)]
pub struct UpdateTodoResponse {}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTodoResponse {
    /// ID of the todo that was requested to be deleted
    pub deleted_todo: String,
}

/// Lists the todos of the authenticated user
#[instrument(skip(todo_service))]
pub async fn get_todos(
    Extension(todo_service): Extension<Arc<TodoService>>,
    user: AuthenticatedUser,
) -> Result<ApiResponse<TodoListResponse>, AppError> {
    let items = todo_service.get_todos_for_user(&user.user_id).await?;

    Ok(ApiResponse::ok(TodoListResponse { items }))
}

/// Creates a todo for the authenticated user
#[instrument(skip(todo_service, payload))]
pub async fn create_todo(
    Extension(todo_service): Extension<Arc<TodoService>>,
    user: AuthenticatedUser,
    JsonBody(payload): JsonBody<CreateTodoRequest>,
) -> Result<ApiResponse<TodoResponse>, AppError> {
    let item = todo_service
        .create_todo(
            &user.user_id,
            CreateTodo {
                name: payload.name,
                due_date: payload.due_date,
            },
        )
        .await?;

    Ok(ApiResponse::created(TodoResponse { item }))
}

/// Replaces the name, due date and completion flag of a todo
#[instrument(skip(todo_service, payload))]
pub async fn update_todo(
    Extension(todo_service): Extension<Arc<TodoService>>,
    user: AuthenticatedUser,
    Path(TodoPath { todo_id }): Path<TodoPath>,
    JsonBody(payload): JsonBody<UpdateTodoRequest>,
) -> Result<ApiResponse<UpdateTodoResponse>, AppError> {
    todo_service
        .update_todo(&todo_id, &user.user_id, &payload.into())
        .await?;

    Ok(ApiResponse::ok(UpdateTodoResponse {}))
}

/// Deletes a todo together with its comments
///
/// Always answers `200`; failures are only logged.
#[instrument(skip(todo_service))]
pub async fn delete_todo(
    Extension(todo_service): Extension<Arc<TodoService>>,
    user: AuthenticatedUser,
    Path(TodoPath { todo_id }): Path<TodoPath>,
) -> ApiResponse<DeleteTodoResponse> {
    if let Err(e) = todo_service.delete_todo(&todo_id, &user.user_id).await {
        tracing::error!("Failed to delete todo: {e}");
    }

    ApiResponse::ok(DeleteTodoResponse {
        deleted_todo: todo_id,
    })
}
