//! Auth service trait.

use async_trait::async_trait;

use crate::credentials::{Credentials, Registration};
use crate::tokens::{AccessToken, RefreshToken, TokenGrant};
use crate::Result;

/// The remote authority that issues and revokes tokens.
///
/// Implementations surface a non-success response as
/// [`Error::Api`](crate::Error::Api) carrying the server message, and network
/// failures as [`Error::Transport`](crate::Error::Transport).
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange a username and password for a token grant.
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant>;

    /// Create an account; a successful registration also signs the user in.
    async fn register(&self, profile: &Registration) -> Result<TokenGrant>;

    /// Mint a new token pair from a refresh token.
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenGrant>;

    /// Revoke a session. Returns the server's acknowledgement message.
    async fn logout(&self, access_token: &AccessToken, refresh_token: &RefreshToken)
    -> Result<String>;
}
