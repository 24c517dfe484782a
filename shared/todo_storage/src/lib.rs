//! Todo storage services
//!
//! This crate provides `DynamoDB` access for the todo backend: the items table
//! (one row per todo, queried per owner) and the comments table (one row per
//! comment, queried per todo).

pub mod comment;
pub mod todo;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
