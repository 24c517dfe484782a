mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use backend::types::Environment;
use common::{parse_response_body, TestSetup};
use pretty_assertions::assert_eq;

fn get_todos(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri("/todos")
        .method(Method::GET)
        .header(header::ORIGIN, "https://todo.example.com");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_missing_token_returns_401() {
    let setup = TestSetup::new();

    let response = setup.send(get_todos(None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "missing_token");
}

#[tokio::test]
async fn test_non_bearer_scheme_returns_401() {
    let setup = TestSetup::new();

    let response = setup.send(get_todos(Some("Basic dXNlcjpwYXNz"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_undecodable_token_returns_401() {
    let setup = TestSetup::new();

    let response = setup.send(get_todos(Some("Bearer not-a-jwt"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "invalid_token");
}

#[tokio::test]
async fn test_disabled_auth_uses_token_as_user_id() {
    let setup = TestSetup::with_environment(Environment::Development { disable_auth: true });

    let request = Request::builder()
        .uri("/todos")
        .method(Method::POST)
        .header(header::AUTHORIZATION, "Bearer local-user")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Offline","dueDate":"2024-01-01"}"#))
        .unwrap();

    let response = setup.send(request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["item"]["userId"], "local-user");
}

#[tokio::test]
async fn test_health_is_public() {
    let setup = TestSetup::new();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = setup.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_header_on_success_and_error() {
    let setup = TestSetup::new();

    let unauthorized = setup.send(get_todos(None)).await;
    assert_eq!(
        unauthorized.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let token = format!("Bearer {}", common::bearer_token("U1"));
    let ok = setup.send(get_todos(Some(&token))).await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(ok.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_openapi_document_is_hidden_in_production() {
    let setup = TestSetup::with_environment(Environment::Production);

    let request = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = setup.send(request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_lists_todo_routes() {
    let setup = TestSetup::new();

    let request = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = setup.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["paths"]["/todos"].is_object());
    assert!(body["paths"]["/todos/{todoId}/comments/{commentId}"].is_object());
}

#[tokio::test]
async fn test_preflight_is_answered_without_token() {
    let setup = TestSetup::new();

    let request = Request::builder()
        .uri("/todos")
        .method(Method::OPTIONS)
        .header(header::ORIGIN, "https://todo.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = setup.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
