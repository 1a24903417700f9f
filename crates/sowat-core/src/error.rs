//! Error types for the Sowat admin toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, backend, authentication, storage and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for Sowat client operations.
///
/// Backend error payloads come in several shapes; they are normalized into
/// [`ApiError`] once, at the transport boundary, so callers never probe JSON.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx response from the backend.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication and session errors.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (bad URL, bad identifier, bad query shape).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Token storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the backend rejected the request as unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(err) if err.is_unauthorized())
    }

    /// Returns true if this error ended the session (tokens were cleared).
    pub fn is_session_terminated(&self) -> bool {
        matches!(
            self,
            Error::Auth(
                AuthError::MissingRefreshToken
                    | AuthError::RefreshFailed(_)
                    | AuthError::SessionTerminated
            )
        )
    }

    /// Text suitable for a transient user-facing notification.
    ///
    /// Prefers the backend-provided message and falls back to the
    /// transport-level description.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(err) => err.user_message(),
            Error::Transport(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Short error code or reason phrase (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Build an API error from a raw response body.
    ///
    /// The backend reports `message` either as a string or, for validation
    /// failures, as a list of strings. Anything else is ignored.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
            return Self::new(status, None, None);
        };

        let message = match value.get("message") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        };

        let error = value
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self::new(status, error, message)
    }

    /// Check if this is an authentication failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// The message to show a user: the backend's, or a generic status line.
    pub fn user_message(&self) -> String {
        match self.message {
            Some(ref message) => message.clone(),
            None => format!("request failed with status code {}", self.status),
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair.
    #[error("invalid credentials{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    InvalidCredentials { message: Option<String> },

    /// The credentials are valid but the account lacks admin privilege.
    #[error("account is not an administrator")]
    NotAdmin,

    /// No refresh token was stored; the session was terminated.
    #[error("no refresh token available, session terminated")]
    MissingRefreshToken,

    /// The refresh call failed; the session was terminated.
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] Box<Error>),

    /// The session was torn down by a concurrent request.
    #[error("session terminated")]
    SessionTerminated,
}

/// Token storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored data could not be parsed.
    #[error("corrupt store {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Internal lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid resource identifier.
    #[error("invalid resource id '{value}': {reason}")]
    ResourceId { value: String, reason: String },

    /// Query parameters must serialize to a flat JSON object.
    #[error("invalid query parameters: {reason}")]
    Query { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
