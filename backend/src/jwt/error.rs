//! Bearer token error types

use thiserror::Error;

/// Errors that can occur while reading a bearer token
#[derive(Error, Debug)]
pub enum JwtError {
    /// The token could not be decoded or its claims are unusable
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}
