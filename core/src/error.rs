//! Error types for the errand API client and its services.
//!
//! # Design
//! `ApiError` is produced at the client boundary, where a response is decoded
//! exactly once. A `success: false` envelope becomes `Rejected` with whatever
//! message the server supplied; everything else describes a failure to talk
//! to the server or to understand its answer.
//!
//! `ServiceError` is what the resource services hand upward. Rejections are
//! classified per operation and always carry a human-readable message, so the
//! stores can record `err.to_string()` verbatim.

use thiserror::Error;

/// Errors returned by `ErrandClient` parse methods and `Transport`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A non-2xx response whose body was not an envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The server answered with `success: false`.
    #[error("request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The envelope reported success but carried no `data`.
    #[error("response envelope has no data")]
    MissingData,

    /// A 2xx response body could not be decoded.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// An id or base URL that cannot form a request URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors returned by the resource services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The server rejected the operation.
    #[error("{0}")]
    Rejected(String),

    /// The server rejected a by-id lookup.
    #[error("{0}")]
    NotFound(String),

    /// The server rejected a create payload.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] ApiError),
}

impl ServiceError {
    /// The server-supplied message for rejections, `None` otherwise.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Validation(msg) => Some(msg),
            ServiceError::Transport(_) => None,
        }
    }
}
