//! Session snapshot types.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::tokens::{AccessToken, RefreshToken, TokenGrant};

/// How long before expiry a session is renewed.
pub const RENEWAL_LEAD: Duration = Duration::from_secs(60);

/// Delay until the renewal of a session expiring at `expires_at` is due:
/// `max(expires_at - now - RENEWAL_LEAD, 0)`.
pub fn renewal_delay(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    let lead = TimeDelta::from_std(RENEWAL_LEAD).unwrap_or(TimeDelta::zero());
    (expires_at - now - lead).to_std().unwrap_or(Duration::ZERO)
}

/// An authenticated session. All three parts are always present together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a grant received at `now`.
    pub fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Self {
        let lifetime = i64::try_from(grant.expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        let expires_at = now
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn renewal_delay(&self, now: DateTime<Utc>) -> Duration {
        renewal_delay(self.expires_at, now)
    }
}

/// A consistent snapshot of the session manager's public state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// True until hydration completes and while login, register or logout
    /// is in flight. Do not branch on `authenticated()` while this is set.
    pub loading: bool,
    pub session: Option<Session>,
}

impl SessionState {
    pub(crate) fn initial() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }

    pub fn authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.session.as_ref().map(|s| &s.access_token)
    }

    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.session.as_ref().map(|s| &s.refresh_token)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.expires_at)
    }
}

/// Navigation signal emitted on session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The authenticated area (the book catalog).
    Catalog,
    /// The sign-in screen.
    SignIn,
}
