//! Bearer token authentication

use aide::OperationIo;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    jwt::decode_subject,
    types::{AppError, Environment},
};

/// Caller identity taken from the bearer token
#[derive(Debug, Clone, OperationIo)]
pub struct AuthenticatedUser {
    /// Subject of the token, owner of the todos
    pub user_id: String,
}

/// Axum extractor for the authenticated user
///
/// Only available on routes behind [`auth_middleware`]:
/// ```ignore
/// async fn protected_handler(user: AuthenticatedUser) -> Result<impl IntoResponse, AppError> {
///     Ok(user.user_id)
/// }
/// ```
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            AppError::new(
                StatusCode::UNAUTHORIZED,
                "missing_auth",
                "Authentication required but user not found in request extensions",
                false,
            )
        })
    }
}

/// Bearer token authentication middleware
///
/// Takes the `sub` claim of the `Authorization: Bearer` token as the user id
/// and stores an [`AuthenticatedUser`] in the request extensions. With
/// `DISABLE_AUTH` in development, the raw token is used as the user id.
///
/// # Errors
///
/// - `AppError` - Missing or undecodable token with 401 status code
pub async fn auth_middleware(
    Extension(environment): Extension<Environment>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::new(
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Authorization header must contain a valid Bearer token",
                false,
            )
        })?;

    let user_id = if environment.disable_auth() {
        token.to_string()
    } else {
        decode_subject(token).map_err(|e| {
            tracing::debug!("Rejected bearer token: {e}");
            AppError::new(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired token",
                false,
            )
        })?
    };

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}
