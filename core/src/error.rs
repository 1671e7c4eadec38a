//! Error types for the todo sync layer.
//!
//! # Design
//! Failures are classified the way a caller reacts to them: the backend was
//! unreachable, the todo no longer exists, the backend rejected the payload,
//! or the backend itself failed. Everything else that came back with a
//! non-2xx status lands in `HttpError` with the raw status and body.

use thiserror::Error;

use crate::types::TodoId;

/// Errors returned by `TodoClient` parse methods, transports and `TodoSync`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The server returned 404; the todo does not exist remotely.
    #[error("resource not found")]
    NotFound,

    /// The server refused the payload (400, 409 or 422).
    #[error("request rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    /// The server failed with a 5xx status.
    #[error("server error (HTTP {status}): {body}")]
    ServerError { status: u16, body: String },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The todo is not present in the local list.
    #[error("todo {0} is not in the local list")]
    UnknownTodo(TodoId),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound,
            400 | 409 | 422 => ApiError::Rejected { status, body },
            500..=599 => ApiError::ServerError { status, body },
            _ => ApiError::HttpError { status, body },
        }
    }
}

/// Errors raised by local view-state transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("todo {0} is not in the local list")]
    UnknownTodo(TodoId),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownTodo(id) => ApiError::UnknownTodo(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_classified() {
        assert!(matches!(ApiError::from_status(404, String::new()), ApiError::NotFound));
        assert!(matches!(
            ApiError::from_status(422, String::new()),
            ApiError::Rejected { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(503, String::new()),
            ApiError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            ApiError::from_status(418, String::new()),
            ApiError::HttpError { status: 418, .. }
        ));
    }

    #[test]
    fn store_errors_convert() {
        let err: ApiError = StoreError::UnknownTodo(TodoId::Num(7)).into();
        assert_eq!(err.to_string(), "todo 7 is not in the local list");
    }
}
