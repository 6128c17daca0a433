//! Error types for the Canvas API client.
//!
//! Failures are classified purely by HTTP status. Response bodies are kept
//! verbatim for diagnostics but never influence the variant chosen.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Canvas operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Canvas API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered 404.
    #[error("Resource not found: {body}")]
    ResourceNotFound {
        /// Raw response body for debugging
        body: Value,
    },

    /// The server answered 401 or 403.
    #[error("Unauthorized: status={status}, body={body}")]
    Unauthorized {
        /// HTTP status code (401 or 403)
        status: u16,
        /// Raw response body for debugging
        body: Value,
    },

    /// Any other non-2xx response.
    #[error("Request failed: status={status}, body={body}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Raw response body for debugging
        body: Value,
    },

    /// The server could not be reached or spoke malformed HTTP.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON parsing or attribute decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A hydrated object was asked for a field its payload never carried.
    #[error("{kind} has no attribute '{name}'")]
    AttributeAbsent {
        /// Kind of the object that was queried
        kind: &'static str,
        /// Name of the missing attribute
        name: String,
    },

    /// The response body did not have the shape the caller needed.
    #[error("Unexpected payload: expected {expected}, found {found}")]
    UnexpectedPayload {
        /// Shape that was expected
        expected: &'static str,
        /// Shape that was received
        found: &'static str,
    },

    /// A required request field was not supplied.
    #[error("Required field missing: {0}")]
    RequiredFieldMissing(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Map a non-success status and its body onto the taxonomy.
    pub(crate) fn from_status(status: u16, body: Value) -> Self {
        match status {
            404 => Error::ResourceNotFound { body },
            401 | 403 => Error::Unauthorized { status, body },
            _ => Error::RequestFailed { status, body },
        }
    }

    /// HTTP status behind this error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ResourceNotFound { .. } => Some(404),
            Error::Unauthorized { status, .. } | Error::RequestFailed { status, .. } => {
                Some(*status)
            }
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the operation could reasonably be retried by the
    /// caller. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the credential was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }

    /// Returns `true` for a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ResourceNotFound { .. })
    }

    /// Returns `true` if the server was never reached or answered garbage.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::ResourceNotFound { .. } | Error::Unauthorized { .. } => true,
            Error::RequestFailed { status, .. } => (400..500).contains(status),
            Error::RequiredFieldMissing(_) | Error::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::RequestFailed { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The preserved response body, for errors that carry one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::ResourceNotFound { body }
            | Error::Unauthorized { body, .. }
            | Error::RequestFailed { body, .. } => Some(body),
            _ => None,
        }
    }
}
