use std::sync::Arc;

use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use backend::{
    attachment_storage::AttachmentStorage, server, todo_service::TodoService, types::Environment,
};
use todo_storage::mock::{InMemoryCommentStore, InMemoryTodoStore};
use tower::ServiceExt;

use super::utils::{bearer_token, parse_response_body};

pub const TEST_BUCKET: &str = "todo-images-test";

/// Setup test environment variables and logging
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router backed by in-memory stores and an offline S3 presigner
pub struct TestSetup {
    pub router: Router,
    pub todo_store: Arc<InMemoryTodoStore>,
    pub comment_store: Arc<InMemoryCommentStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_stores(InMemoryTodoStore::new(), InMemoryCommentStore::new())
    }

    pub fn with_environment(environment: Environment) -> Self {
        Self::build(
            environment,
            InMemoryTodoStore::new(),
            InMemoryCommentStore::new(),
        )
    }

    pub fn with_stores(todo_store: InMemoryTodoStore, comment_store: InMemoryCommentStore) -> Self {
        Self::build(
            Environment::Development {
                disable_auth: false,
            },
            todo_store,
            comment_store,
        )
    }

    fn build(
        environment: Environment,
        todo_store: InMemoryTodoStore,
        comment_store: InMemoryCommentStore,
    ) -> Self {
        setup_test_env();

        // Presigning is computed locally, no S3 endpoint is contacted
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::from_keys("test", "test", None))
            .build();
        let attachment_storage = Arc::new(AttachmentStorage::new(
            Arc::new(aws_sdk_s3::Client::from_conf(s3_config)),
            TEST_BUCKET.to_string(),
            300,
        ));

        let todo_store = Arc::new(todo_store);
        let comment_store = Arc::new(comment_store);
        let todo_service = Arc::new(TodoService::new(
            todo_store.clone(),
            comment_store.clone(),
            attachment_storage,
        ));

        Self {
            router: server::app(environment, todo_service),
            todo_store,
            comment_store,
        }
    }

    /// Sends a request as `user_id`, with a JSON body when one is given
    pub async fn send_as(
        &self,
        user_id: &str,
        method: Method,
        route: &str,
        payload: Option<serde_json::Value>,
    ) -> Response {
        let builder = Request::builder()
            .uri(route)
            .method(method)
            .header(header::ORIGIN, "https://todo.example.com")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", bearer_token(user_id)),
            );

        let request = match payload {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a prepared request as is
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Creates a todo through the API and returns its id
    pub async fn create_todo(&self, user_id: &str, name: &str) -> String {
        let response = self
            .send_as(
                user_id,
                Method::POST,
                "/todos",
                Some(serde_json::json!({ "name": name, "dueDate": "2024-01-01" })),
            )
            .await;
        let body = parse_response_body(response).await;
        body["item"]["todoId"].as_str().unwrap().to_string()
    }
}
