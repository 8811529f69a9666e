//! Request executor
//!
//! Performs exactly one round trip against the open platform and normalizes
//! the outcome:
//! - attaches `Authorization: Bearer <tenant token>` unless the caller set one
//! - always sends `Content-Type: application/json; charset=utf-8`
//! - serializes the body as JSON for every method except GET
//! - accepts only HTTP 200 carrying an envelope with `code == 0`
//!
//! There are no retries; the client-wide timeout bounds each call.

use super::envelope::{decode_data, Envelope};
use super::rate_limit::RateLimiter;
use crate::auth::CredentialStore;
use crate::config::ClientSettings;
use crate::error::{Error, Result};
use crate::types::{Method, StringMap};
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Content type sent with every request
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Join `path` onto `host`, normalizing the slashes between them
pub fn build_url(host: &str, path: &str) -> Result<Url> {
    let host = host.trim_end_matches('/');
    let path = path.trim_matches('/');
    Ok(Url::parse(&format!("{host}/{path}"))?)
}

/// Characters left as-is inside a path segment, as `encodeURIComponent` does
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode an id before it is spliced into a request path
pub fn encode_segment(raw: &str) -> String {
    percent_encode(raw.as_bytes(), PATH_SEGMENT_SET).to_string()
}

/// Per-call parameters
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: StringMap,
    /// Request headers, merged over the defaults
    pub headers: StringMap,
    /// Request body (ignored for GET, sent as `null` when unset)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize any value as the body
    pub fn body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            error!("Cannot serialize request body: {e}");
            Error::JsonParse(e)
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Executes single requests against the open platform
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    credentials: CredentialStore,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client with its own connection pool
    pub fn new(
        base_url: impl Into<String>,
        credentials: CredentialStore,
        settings: &ClientSettings,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(&settings.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self::with_client(client, base_url, credentials, settings))
    }

    /// Create a client on top of an existing reqwest client
    ///
    /// The reqwest client should already carry `settings.timeout`.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        credentials: CredentialStore,
        settings: &ClientSettings,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: settings.timeout,
            credentials,
            rate_limiter: settings.rate_limit.as_ref().map(RateLimiter::new),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential slot read on every request
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, RequestConfig::default())
            .await
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, path: &str, config: RequestConfig) -> Result<Value> {
        self.request(Method::GET, path, config).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a request and return the envelope's `data`
    ///
    /// A successful envelope without `data` yields `Value::Null`.
    pub async fn request(&self, method: Method, path: &str, config: RequestConfig) -> Result<Value> {
        let body = self.round_trip(method, path, &config).await?;
        let envelope: Envelope<Value> = Envelope::parse(&body)?;

        match envelope.into_data(&body) {
            Ok(data) => Ok(data.unwrap_or(Value::Null)),
            Err(e) => {
                error!(
                    "Response status error for {} {}: {}; body: {}",
                    method, path, e, body
                );
                Err(e)
            }
        }
    }

    /// Make a request and decode `data` into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let data = self.request(method, path, config).await?;
        decode_data(path, data)
    }

    /// Make a request and decode the whole body into `T`
    ///
    /// For endpoints that answer with their payload beside `data` instead of
    /// inside it. The envelope code is still checked first.
    pub async fn request_body_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let body = self.round_trip(method, path, &config).await?;
        let envelope: Envelope<Value> = Envelope::parse(&body)?;

        if let Err(e) = envelope.into_data(&body) {
            error!(
                "Response status error for {} {}: {}; body: {}",
                method, path, e, body
            );
            return Err(e);
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Cannot decode response of {}: {}", path, e);
            Error::decode(format!("{path}: {e}"))
        })
    }

    /// Build the outgoing request without sending it
    ///
    /// The current credential is read exactly once here.
    pub async fn build_request(
        &self,
        method: Method,
        path: &str,
        config: &RequestConfig,
    ) -> Result<Request> {
        let mut url = build_url(&self.base_url, path).map_err(|e| {
            error!("Url parse error for {}: {}", path, e);
            e
        })?;
        if !config.query.is_empty() {
            url.query_pairs_mut().extend_pairs(config.query.iter());
        }

        let headers = self.build_headers(config).await?;
        let mut req = self.client.request(method.into(), url).headers(headers);

        if method.sends_body() {
            let payload = serde_json::to_vec(&config.body).map_err(|e| {
                error!("Cannot serialize body for {} {}: {}", method, path, e);
                Error::JsonParse(e)
            })?;
            req = req.body(payload);
        }

        req.build().map_err(|e| {
            error!("Request create error for {} {}: {}", method, path, e);
            Error::Http(e)
        })
    }

    async fn build_headers(&self, config: &RequestConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::InvalidHeader {
                name: key.clone(),
                message: e.to_string(),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: key.clone(),
                message: e.to_string(),
            })?;
            headers.insert(name, value);
        }

        if !headers.contains_key(AUTHORIZATION) {
            let token = self.credentials.token().await;
            let mut value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    Error::InvalidHeader {
                        name: AUTHORIZATION.to_string(),
                        message: e.to_string(),
                    }
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // Callers cannot change the content type.
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(headers)
    }

    /// Send one request and return the body of a 200 response
    async fn round_trip(&self, method: Method, path: &str, config: &RequestConfig) -> Result<String> {
        let request = self.build_request(method, path, config).await?;

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        debug!("{} {}", method, request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                error!(
                    "Request {} {} timed out after {:?}",
                    method, path, self.timeout
                );
                Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                error!("Client do error for {} {}: {}", method, path, e);
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Response status error for {} {}: HTTP {}; body: {}",
                method,
                path,
                status.as_u16(),
                body
            );
            return Err(Error::http_status(status.as_u16(), body));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                error!(
                    "Reading body of {} {} timed out after {:?}",
                    method, path, self.timeout
                );
                Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                error!("Read response body error for {} {}: {}", method, path, e);
                Error::Http(e)
            }
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
