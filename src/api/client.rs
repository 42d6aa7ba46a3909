//! JSON client owning the base URL and request timeout.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::AuthError;
use crate::AuthConfig;

/// JSON API client for the authentication backend.
///
/// No retries, no cookie state, no token refresh; a single timeout
/// from the configuration bounds every request.
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    /// Create a new API client from the given configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AuthError::Config(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// POST a JSON body to a route under the base URL, returning the
    /// raw response. Transport failures map to [`AuthError::Network`];
    /// status handling is the caller's concern.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, AuthError> {
        // Plain concatenation keeps any path prefix in the base URL
        // (e.g. "https://host/api/v1"); `Url::join` would drop it for
        // absolute routes.
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);

        debug!("POST {}", url);

        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
