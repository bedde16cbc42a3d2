//! HTTP-backed auth service.

use async_trait::async_trait;
use tracing::{debug, instrument};

use folio_core::{
    AccessToken, AuthService, Credentials, RefreshToken, Registration, Result, TokenGrant,
};

use crate::client::HttpClient;
use crate::endpoints::{
    LOGIN, LOGOUT, LogoutRequest, MessageResponse, REFRESH, REGISTER, RefreshRequest,
    TokenValidation, VALIDATE, ValidateRequest,
};

/// The `/auth` endpoints of the book API.
#[derive(Debug, Clone)]
pub struct HttpAuth {
    client: HttpClient,
}

impl HttpAuth {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Ask the server whether an access token is still accepted.
    #[instrument(skip(self, token))]
    pub async fn validate(&self, token: &AccessToken) -> Result<TokenValidation> {
        debug!("Validating token");
        let request = ValidateRequest {
            token: token.as_str(),
        };
        self.client
            .post(VALIDATE, &request, None, "Token validation failed")
            .await
    }
}

#[async_trait]
impl AuthService for HttpAuth {
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant> {
        debug!("Requesting login");
        self.client
            .post(LOGIN, credentials, None, "Login failed")
            .await
    }

    #[instrument(skip(self, profile), fields(username = %profile.username))]
    async fn register(&self, profile: &Registration) -> Result<TokenGrant> {
        debug!("Requesting registration");
        self.client
            .post(REGISTER, profile, None, "Registration failed")
            .await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenGrant> {
        debug!("Requesting token refresh");
        let request = RefreshRequest {
            refresh_token: refresh_token.as_str(),
        };
        self.client
            .post(REFRESH, &request, None, "Token refresh failed")
            .await
    }

    #[instrument(skip_all)]
    async fn logout(
        &self,
        access_token: &AccessToken,
        refresh_token: &RefreshToken,
    ) -> Result<String> {
        debug!("Requesting logout");
        let request = LogoutRequest {
            refresh_token: refresh_token.as_str(),
        };
        let response: MessageResponse = self
            .client
            .post(LOGOUT, &request, Some(access_token), "Logout failed")
            .await?;
        Ok(response.message)
    }
}
