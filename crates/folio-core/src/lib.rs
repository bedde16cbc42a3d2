//! folio-core - Core types, traits and session management for folio.
//!
//! All authenticated operations flow through a [`SessionManager`], which owns
//! the access/refresh token pair, mirrors it to a [`KeyValueStore`] and renews
//! it in the background before it expires.
//!
//! # Example
//!
//! ```no_run
//! use folio_core::{Credentials, MemoryStore, SessionManager};
//! # use folio_core::{AccessToken, AuthService, Registration, RefreshToken, Result, TokenGrant};
//! # struct Remote;
//! # #[async_trait::async_trait]
//! # impl AuthService for Remote {
//! #     async fn login(&self, _: &Credentials) -> Result<TokenGrant> { unimplemented!() }
//! #     async fn register(&self, _: &Registration) -> Result<TokenGrant> { unimplemented!() }
//! #     async fn refresh(&self, _: &RefreshToken) -> Result<TokenGrant> { unimplemented!() }
//! #     async fn logout(&self, _: &AccessToken, _: &RefreshToken) -> Result<String> { unimplemented!() }
//! # }
//!
//! # async fn example() -> Result<()> {
//! let manager = SessionManager::start(Remote, MemoryStore::new());
//! manager.login(&Credentials::new("alice", "pw")).await?;
//! assert!(manager.is_authenticated());
//! # Ok(())
//! # }
//! ```

pub mod books;
pub mod credentials;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use books::{Book, BookDraft, BookPatch};
pub use credentials::{Credentials, Registration};
pub use error::Error;
pub use session::{Clock, Route, Session, SessionManager, SessionState, SystemClock};
pub use store::MemoryStore;
pub use tokens::{AccessToken, RefreshToken, TokenGrant};
pub use traits::{AuthService, KeyValueStore};
pub use types::{ApiUrl, BookId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
