//! HTTP plumbing shared by every resource module.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::BackofficeConfig;

use super::ApiError;

/// Default request timeout for store calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the document store.
///
/// Cheap to clone; every clone shares one connection pool. Resource
/// methods live in the sibling modules of [`super`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

/// Wire shape of the store's error bodies.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// Create a client for the store at `base_url`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never
    /// happen under normal circumstances as we use standard TLS
    /// configuration.
    #[must_use]
    pub fn new(base_url: Url, token: Option<SecretString>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url,
                token,
            }),
        }
    }

    /// Create a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &BackofficeConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.api_token.clone())
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.inner.http.request(method, url);
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET a JSON resource.
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::GET, self.url(path)?)
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// GET a JSON resource, mapping 404 to `None`.
    pub(super) async fn get_json_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, self.url(path)?)
            .query(query)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(response).await.map(Some)
    }

    /// POST a JSON body, decoding a JSON response.
    pub(super) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, self.url(path)?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// POST without a request body, decoding a JSON response.
    pub(super) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, self.url(path)?)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// PUT a JSON body, decoding a JSON response.
    pub(super) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::PUT, self.url(path)?)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// DELETE a resource, ignoring any response body.
    pub(super) async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, self.url(path)?)
            .query(query)
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Prefer the server-provided message; fall back to a generic one.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    body
                }
            });

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.token.is_some())
            .finish()
    }
}
