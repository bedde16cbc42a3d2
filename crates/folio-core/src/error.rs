//! Error types for folio.
//!
//! A single error type with explicit variants for transport, server-side,
//! session, input validation and persistence failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for folio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server rejected the request. Displays the server message verbatim.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Session-level errors raised by the session manager.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors.
    #[error("{0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Persistent store errors.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns the server-side error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true for transient network failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Session-level errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The operation needs an authenticated session and there is none.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A response arrived after a logout and was discarded.
    #[error("logged out while the request was in flight")]
    Superseded,
}

/// Classification of a server-side rejection by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400 or 422: the request body was rejected.
    Validation,
    /// 401 or 403: credentials or token rejected.
    Unauthorized,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 5xx.
    Server,
    /// Any other non-success status.
    Other,
}

/// A non-success HTTP response from the book or auth API.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Server-provided message, or the operation-specific fallback.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Classify the error by status code.
    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            400 | 422 => ApiErrorKind::Validation,
            401 | 403 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid book identifier.
    #[error("invalid book ID '{value}': {reason}")]
    BookId { value: String, reason: String },

    /// A book form field failed validation.
    #[error("{message}")]
    Book { message: String },

    /// Login or registration data failed validation.
    #[error("{message}")]
    Account { message: String },
}

/// Persistent store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// A stored value could not be interpreted.
    #[error("corrupt value for '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}
