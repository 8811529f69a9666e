//! Feishu client
//!
//! Ties the credential store, token manager and request executor together.
//! Endpoint helpers in [`crate::api`] are implemented on this type.

use crate::auth::{Credential, CredentialStore, RefreshHandle, TokenManager};
use crate::config::{AppConfig, ClientSettings};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::Method;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// A Feishu open platform client for one app
pub struct FeishuClient {
    config: AppConfig,
    http: HttpClient,
    tokens: Arc<TokenManager>,
    refresh: Mutex<Option<RefreshHandle>>,
}

impl FeishuClient {
    /// Create a client with default settings
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_settings(config, &ClientSettings::default())
    }

    /// Create a client with custom settings
    pub fn with_settings(config: AppConfig, settings: &ClientSettings) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(&settings.user_agent)
            .build()
            .map_err(Error::Http)?;

        let store = CredentialStore::new();
        let tokens = TokenManager::new(
            &config,
            client.clone(),
            store.clone(),
            settings.refresh_interval,
        )?;
        let http = HttpClient::with_client(client, config.host.clone(), store, settings);

        Ok(Self {
            config,
            http,
            tokens: Arc::new(tokens),
            refresh: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The request executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The token manager
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Copy of the current tenant credential
    pub async fn credential(&self) -> Credential {
        self.http.credentials().snapshot().await
    }

    /// Fetch a tenant token once, without starting the refresh loop
    pub async fn authenticate(&self) -> Result<()> {
        self.tokens.authenticate().await
    }

    /// Authenticate and keep the token fresh in the background
    ///
    /// Calling this again while the loop runs does nothing.
    pub async fn start(&self) {
        let mut refresh = self.refresh.lock().await;
        if refresh.as_ref().is_some_and(RefreshHandle::is_running) {
            return;
        }
        *refresh = Some(self.tokens.start_refresh_loop().await);
        info!("Token refresh started for app {}", self.config.app_id);
    }

    /// Whether the background refresh is running
    pub async fn is_running(&self) -> bool {
        self.refresh
            .lock()
            .await
            .as_ref()
            .is_some_and(RefreshHandle::is_running)
    }

    /// Stop the background refresh
    pub async fn shutdown(&self) {
        let handle = self.refresh.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await;
            info!("Token refresh stopped for app {}", self.config.app_id);
        }
    }

    /// One round trip, returning `data`
    pub async fn request(&self, method: Method, path: &str, config: RequestConfig) -> Result<Value> {
        self.http.request(method, path, config).await
    }

    /// One round trip, decoding `data` as `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.http.request_as(method, path, config).await
    }

    /// A whole listing as raw JSON items
    pub async fn get_all_pages(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
        page_size: u32,
    ) -> Result<Vec<Value>> {
        self.http
            .get_all_pages(method, path, config, page_size)
            .await
    }

    /// A whole listing decoded as `T`
    pub async fn get_all_pages_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
        page_size: u32,
    ) -> Result<Vec<T>> {
        self.http
            .get_all_pages_as(method, path, config, page_size)
            .await
    }
}

impl std::fmt::Debug for FeishuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeishuClient")
            .field("app_id", &self.config.app_id)
            .field("host", &self.config.host)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
