//! Success responses with an explicit status code

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

/// JSON body paired with the status code it is sent with
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: T,
}

impl<T> ApiResponse<T> {
    /// `200 OK`
    pub const fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// `201 Created`
    pub const fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }

    /// `204 No Content`, body included anyway for clients that read it
    pub const fn no_content(body: T) -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl<T: JsonSchema> OperationOutput for ApiResponse<T> {
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<T>::operation_response(ctx, operation)
    }
}
