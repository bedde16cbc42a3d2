//! JSON-over-HTTP client for the book API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use folio_core::error::{ApiError, Error, TransportError};
use folio_core::{AccessToken, ApiUrl, Result};

use crate::endpoints::ErrorBody;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one API base URL.
///
/// Every call takes the operation's fallback message, used as the error text
/// when a non-success response carries no `message` of its own.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpClient {
    pub fn new(api: ApiUrl) -> Result<Self> {
        Self::with_timeout(api, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api: ApiUrl, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, api })
    }

    /// Returns the API base URL this client talks to.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get<R>(&self, path: &str, token: &AccessToken, fallback: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("GET");
        let request = self.request(Method::GET, path, Some(token));
        self.send(request, fallback).await
    }

    /// POST a JSON body, with a bearer token when one is given.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AccessToken>,
        fallback: &str,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST");
        let request = self.request(Method::POST, path, token).json(body);
        self.send(request, fallback).await
    }

    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn patch<B, R>(
        &self,
        path: &str,
        body: &B,
        token: &AccessToken,
        fallback: &str,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("PATCH");
        let request = self.request(Method::PATCH, path, Some(token)).json(body);
        self.send(request, fallback).await
    }

    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn delete<R>(&self, path: &str, token: &AccessToken, fallback: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("DELETE");
        let request = self.request(Method::DELETE, path, Some(token));
        self.send(request, fallback).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&AccessToken>) -> RequestBuilder {
        let builder = self.client.request(method, self.api.endpoint(path));
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Send a request and decode the success body or the error.
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<R> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(api_error(response, fallback).await.into())
        }
    }
}

/// Build an [`ApiError`] from a non-success response.
async fn api_error(response: reqwest::Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();

    // The body may be missing or not JSON at all
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| fallback.to_string());

    ApiError::new(status, message)
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    transport.into()
}
