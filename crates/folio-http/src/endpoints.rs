//! Endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

use folio_core::BookId;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const REFRESH: &str = "/auth/refresh";
pub const LOGOUT: &str = "/auth/logout";
pub const VALIDATE: &str = "/auth/validate";

pub const BOOKS: &str = "/books";

/// Path of a single book.
pub fn book(id: &BookId) -> String {
    format!("{}/{}", BOOKS, id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Request body for logout. The access token travels in the header.
#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
}

/// Acknowledgement returned by logout.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Request body for validate.
#[derive(Debug, Serialize)]
pub struct ValidateRequest<'a> {
    pub token: &'a str,
}

/// Result of asking the server whether a token is still good.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenValidation {
    pub valid: bool,
    /// Decoded token claims, as the server chooses to report them.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Error body of a non-success response.
///
/// Validation failures report a list of messages; everything else a single
/// string.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

impl ErrorBody {
    /// The server message, or `None` when absent or empty.
    pub fn into_message(self) -> Option<String> {
        let message = match self.message? {
            ErrorMessage::Text(text) => text,
            ErrorMessage::List(items) => items.join("; "),
        };
        (!message.is_empty()).then_some(message)
    }
}
