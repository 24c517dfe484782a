use std::sync::Arc;
use std::time::Duration;

use aide::openapi::{Info, OpenApi};
use axum::{http::StatusCode, Extension, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::routes;
use crate::{todo_service::TodoService, types::Environment};

/// Upper bound on the time spent handling a single request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Answers `408 Request Timeout` when handling takes longer than `timeout`
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Builds the complete router with documentation and middleware layers
pub fn app(environment: Environment, todo_service: Arc<TodoService>) -> Router {
    let mut openapi = OpenApi {
        info: Info {
            title: "Todo Backend".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(todo_service))
        .layer(TraceLayer::new_for_http())
        // Browser clients call from any origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(request_timeout_layer(REQUEST_TIMEOUT))
}

/// Starts the server with the given environment and dependencies
///
/// Inside AWS Lambda the router is driven by the Lambda runtime, otherwise it
/// listens on `0.0.0.0:$PORT`.
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(environment: Environment, todo_service: Arc<TodoService>) -> anyhow::Result<()> {
    let port = environment.port()?;
    let router = app(environment, todo_service);

    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        tracing::info!("Todo Backend started on AWS Lambda");
        return lambda_http::run(router)
            .await
            .map_err(|e| anyhow::anyhow!(e));
    }

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Todo Backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
