//! Gateway error taxonomy.
//!
//! Two layers: [`ApiError`] carries the human-readable message the UI
//! shows inline, [`ErrorKind`] is the closed classification callers can
//! branch on without parsing messages.

/// Failure raised by the API gateway client or the session guard.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No response obtained at all (offline, DNS, refused connection).
    #[error("network unavailable: {0}")]
    Network(String),
    /// Response received with a non-success status. `message` is the
    /// server's JSON `error` field when the body parses, otherwise
    /// `HTTP <status>`.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// A 2xx body that should have parsed as JSON did not.
    #[error("invalid response payload: {0}")]
    Decode(String),
    /// The per-call deadline expired before the server answered.
    #[error("request timed out during {0}")]
    Timeout(&'static str),
    /// Another authentication operation already holds the single-flight
    /// slot.
    #[error("another authentication request is already in flight")]
    Busy,
    /// The configured base URL could not produce a usable HTTP client.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Closed classification of gateway failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server rejected the credentials or session (HTTP 401).
    InvalidCredentials,
    /// The server could not be reached or did not answer in time.
    NetworkUnavailable,
    /// Everything else the server or client refused.
    ServerError,
}

impl ApiError {
    /// Classify this failure. Messages remain the user-visible surface;
    /// the kind rides alongside for programmatic handling.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Timeout(_) => ErrorKind::NetworkUnavailable,
            Self::Server { status: 401, .. } => ErrorKind::InvalidCredentials,
            Self::Server { .. } | Self::Decode(_) | Self::Busy | Self::Config(_) => {
                ErrorKind::ServerError
            }
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
