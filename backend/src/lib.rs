//! Todo Backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// S3 presigned URLs for todo attachments
pub mod attachment_storage;

/// Bearer token decoding
pub mod jwt;

/// Request middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Todo business logic
pub mod todo_service;

/// Shared API types
pub mod types;
