//! # Framework Errors
//!
//! Only caller mistakes and cancellation are errors here. Remote outcomes
//! (404, rejected validation, a dead connection) come back as data: absent
//! values, status codes and error lists.

use crate::query::QueryError;

/// Errors returned by [`ResourceClient`](crate::framework::ResourceClient) operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ClientError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Failures reported by an [`HttpTransport`](crate::framework::HttpTransport).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Unreadable response body: {0}")]
    Body(String),
}
