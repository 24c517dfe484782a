mod attachments;
mod comments;
mod docs;
mod health;
mod todos;

use aide::axum::{
    routing::{delete, get, post, put},
    ApiRouter,
};
use axum::middleware;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::middleware::auth_middleware;

/// Path parameters of routes addressing a single todo
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoPath {
    /// ID of the todo
    pub todo_id: String,
}

/// Path parameters of routes addressing a single comment
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentPath {
    /// ID of the todo the comment belongs to
    pub todo_id: String,
    /// ID of the comment
    pub comment_id: String,
}

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    let public_routes = ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler));

    let protected_routes = ApiRouter::new()
        .api_route("/todos", get(todos::get_todos).post(todos::create_todo))
        .api_route(
            "/todos/{todoId}",
            put(todos::update_todo).delete(todos::delete_todo),
        )
        .api_route(
            "/todos/{todoId}/attachment",
            post(attachments::create_upload_url).get(attachments::create_image_url),
        )
        .api_route(
            "/todos/{todoId}/comments",
            post(comments::create_comment).get(comments::get_comments),
        )
        .api_route(
            "/todos/{todoId}/comments/{commentId}",
            delete(comments::delete_comment),
        )
        .layer(middleware::from_fn(auth_middleware));

    public_routes.merge(protected_routes)
}
