//! Error types for the reminders client.
//!
//! # Design
//! Transport failures carry the session's own error as their source so the
//! caller sees exactly what the network layer reported. Everything else is
//! a problem with the remote payload (or with our request body) and surfaces
//! as a dedicated variant rather than being papered over with defaults.

/// Result type alias for reminders operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `RemindersClient` parse methods and `RemindersService`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The session could not complete the round-trip (network, TLS, auth).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not JSON or lacks the expected keys.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A `dueDate` array had the wrong arity or an impossible calendar value.
    #[error("malformed due date {values:?}: {reason}")]
    MalformedDueDate { values: Vec<i64>, reason: String },
}

impl ApiError {
    /// Wraps any transport-level error.
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }
}
