//! Mapping between a [`Session`] and its three persisted keys.

use chrono::DateTime;

use crate::Result;
use crate::error::StoreError;
use crate::tokens::{AccessToken, RefreshToken};
use crate::traits::KeyValueStore;

use super::Session;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Expiry as decimal milliseconds since the Unix epoch.
pub const EXPIRY_KEY: &str = "tokenExpiry";

pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, EXPIRY_KEY];

/// Read a persisted session.
///
/// Returns `Ok(None)` when no key is present and an error when only some of
/// them are, or the expiry cannot be parsed.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Session>> {
    let access = store.get(ACCESS_TOKEN_KEY)?;
    let refresh = store.get(REFRESH_TOKEN_KEY)?;
    let expiry = store.get(EXPIRY_KEY)?;

    match (access, refresh, expiry) {
        (None, None, None) => Ok(None),
        (Some(access), Some(refresh), Some(expiry)) => {
            let expires_at = expiry
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .ok_or_else(|| StoreError::Corrupt {
                    key: EXPIRY_KEY.to_string(),
                    reason: format!("'{}' is not a millisecond timestamp", expiry),
                })?;

            Ok(Some(Session {
                access_token: AccessToken::new(access),
                refresh_token: RefreshToken::new(refresh),
                expires_at,
            }))
        }
        (access, refresh, _) => {
            let missing = if access.is_none() {
                ACCESS_TOKEN_KEY
            } else if refresh.is_none() {
                REFRESH_TOKEN_KEY
            } else {
                EXPIRY_KEY
            };
            Err(StoreError::Corrupt {
                key: missing.to_string(),
                reason: "incomplete session".to_string(),
            }
            .into())
        }
    }
}

/// Write all three keys.
pub fn save<S: KeyValueStore + ?Sized>(store: &S, session: &Session) -> Result<()> {
    let expiry = session.expires_at.timestamp_millis().to_string();
    store.set_many(&[
        (ACCESS_TOKEN_KEY, session.access_token.as_str()),
        (REFRESH_TOKEN_KEY, session.refresh_token.as_str()),
        (EXPIRY_KEY, &expiry),
    ])
}

/// Remove all three keys.
pub fn purge<S: KeyValueStore + ?Sized>(store: &S) -> Result<()> {
    store.remove_many(&SESSION_KEYS)
}
