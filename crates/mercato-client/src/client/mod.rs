//! HTTP client for the marketplace JSON API.

mod pos;
mod storefront;

use std::time::Duration;

use mercato_core::AppConfig;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::error::ClientError;

pub use pos::PosResource;
pub use storefront::ProductQuery;

/// Client for the storefront and POS endpoints.
///
/// Holds no session state: every call takes the [`AuthContext`] to
/// authenticate with. A 401 from any endpoint clears that context's token and
/// surfaces as [`ClientError::Unauthorized`].
///
/// Requests are not retried. Transport failures surface as
/// [`ClientError::Http`] for the caller to turn into an error state.
pub struct MercatoClient {
    client: Client,
    base_url: Url,
}

impl MercatoClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `base_url` may carry a path prefix (e.g. `https://host/backend`);
    /// endpoint paths are appended after it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse as an
    /// absolute URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`MercatoClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Builds an endpoint URL from path segments and query pairs.
    ///
    /// Segments are percent-encoded individually, so IDs and order numbers
    /// cannot escape their path position.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    async fn get_json(&self, auth: &AuthContext, url: Url) -> Result<Value, ClientError> {
        let request = self.client.get(url.clone());
        self.send(auth, request, url).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        auth: &AuthContext,
        url: Url,
        body: &B,
    ) -> Result<Value, ClientError> {
        let request = self.client.post(url.clone()).json(body);
        self.send(auth, request, url).await
    }

    /// Attaches auth, sends, maps status codes to errors, and parses JSON.
    ///
    /// An empty success body (e.g. 204) parses as `Value::Null`.
    async fn send(
        &self,
        auth: &AuthContext,
        request: RequestBuilder,
        url: Url,
    ) -> Result<Value, ClientError> {
        let mut request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = auth.bearer_token() {
            request = request.bearer_auth(token);
        }

        tracing::debug!(url = %url, "sending marketplace API request");
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(auth.expire());
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "marketplace API returned error status");
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
