//! Custom extractors for request bodies

use aide::operation::OperationInput;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::types::error::AppError;

/// JSON extractor that turns body rejections into the API error envelope
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                JsonRejection::MissingJsonContentType(_) => AppError::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_content_type",
                    "Missing Content-Type: application/json header",
                    false,
                ),
                err => {
                    tracing::debug!("Rejected JSON body: {err}");
                    AppError::new(
                        StatusCode::BAD_REQUEST,
                        "invalid_json",
                        "Invalid JSON payload",
                        false,
                    )
                }
            })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for JsonBody<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Same wire shape as Json<T>
        Json::<T>::operation_input(ctx, operation);
    }
}
