//! Validated identifier and address types.

mod api_url;
mod book_id;

pub use api_url::ApiUrl;
pub use book_id::BookId;

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
