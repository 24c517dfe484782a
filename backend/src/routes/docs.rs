use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json,
};

use crate::types::Environment;

/// Serves the rendered API reference and the raw `OpenAPI` document
pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Todo Backend Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

/// The document is only published outside production
#[allow(clippy::unused_async)]
async fn openapi_schema(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<OpenApi>,
) -> Response {
    if environment.show_api_docs() {
        Json(openapi).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
