//! Token types for bearer authentication.

use std::fmt;

use serde::Deserialize;

/// A short-lived bearer credential for API calls.
///
/// Never shown in Debug output. Treat as opaque.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A longer-lived credential exchanged for a new access token.
///
/// Never shown in Debug output. Treat as opaque.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh and logout requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// Tokens issued by a successful login, registration or refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    #[serde(deserialize_with = "de_access_token")]
    pub access_token: AccessToken,
    #[serde(deserialize_with = "de_refresh_token")]
    pub refresh_token: RefreshToken,
    /// Lifetime of the access token in seconds, as declared by the server.
    pub expires_in: u64,
}

impl TokenGrant {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
    ) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            refresh_token: RefreshToken::new(refresh_token),
            expires_in,
        }
    }
}

fn de_access_token<'de, D>(deserializer: D) -> Result<AccessToken, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(AccessToken::new)
}

fn de_refresh_token<'de, D>(deserializer: D) -> Result<RefreshToken, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(RefreshToken::new)
}
