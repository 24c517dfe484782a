use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Issue a bearer token for `user_id` the way the identity provider would
///
/// The backend never checks the signature, so any secret works.
pub fn bearer_token(user_id: &str) -> String {
    encode(
        &Header::default(),
        &json!({
            "sub": user_id,
            "exp": Utc::now().timestamp() + 3600,
        }),
        &EncodingKey::from_secret(b"identity-provider-secret"),
    )
    .unwrap()
}
