//! Wiring of the session manager and API clients for one invocation.

use anyhow::{Context, Result, bail};
use tracing::debug;

use folio_core::error::AuthError;
use folio_core::{AccessToken, Error, SessionManager};
use folio_file::FileStore;
use folio_http::{HttpAuth, HttpBooks, HttpClient};

use crate::config::Config;

pub const NO_SESSION: &str = "No active session. Run 'folio auth login' first.";

pub type Manager = SessionManager<HttpAuth, FileStore>;

/// Everything a command needs to talk to the API.
pub struct App {
    pub manager: Manager,
    pub auth: HttpAuth,
    pub books: HttpBooks,
    /// Whether a persisted session was found at startup.
    restored: bool,
}

impl App {
    /// Build the clients and restore the persisted session, if any.
    pub fn start(config: &Config) -> Result<Self> {
        let client = HttpClient::with_timeout(config.api.clone(), config.timeout)
            .context("Failed to build HTTP client")?;
        let auth = HttpAuth::new(client.clone());
        let store = FileStore::new(&config.session_file);

        debug!(session_file = %config.session_file.display(), "Starting session manager");
        let manager = SessionManager::new(auth.clone(), store);
        let restored = manager.hydrate();

        Ok(Self {
            manager,
            auth,
            books: HttpBooks::new(client),
            restored,
        })
    }

    /// Access token for an authenticated call.
    ///
    /// Fails with a hint to log in when there is no session, or when the
    /// session could not be renewed.
    pub async fn token(&self) -> Result<AccessToken> {
        if !self.restored {
            bail!(NO_SESSION);
        }

        match self.manager.authorized_token().await {
            Ok(token) => Ok(token),
            Err(Error::Auth(AuthError::NotAuthenticated)) => {
                bail!("Session expired and could not be renewed. Run 'folio auth login' again.")
            }
            Err(e) => Err(e).context("Failed to obtain access token"),
        }
    }
}
