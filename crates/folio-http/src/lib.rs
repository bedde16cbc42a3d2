//! folio-http - HTTP implementation of the folio auth service and books API.
//!
//! [`HttpAuth`] implements [`folio_core::AuthService`] for the session
//! manager; [`HttpBooks`] performs authenticated catalog calls. Both share an
//! [`HttpClient`] bound to one API base URL.

mod auth;
mod books;
mod client;
pub mod endpoints;

pub use auth::HttpAuth;
pub use books::HttpBooks;
pub use client::{DEFAULT_TIMEOUT, HttpClient};
pub use endpoints::TokenValidation;
