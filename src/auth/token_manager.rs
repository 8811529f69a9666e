//! Tenant access token manager
//!
//! Obtains the tenant access token from the internal-app endpoint and keeps
//! it fresh from a background task.

use super::types::{Credential, CredentialStore, TenantTokenResponse};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::http::build_url;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Token issuance path for self-built (internal) apps
pub const TENANT_TOKEN_PATH: &str = "open-apis/auth/v3/tenant_access_token/internal";

/// Obtains and refreshes the tenant access token
pub struct TokenManager {
    app_id: String,
    app_secret: String,
    token_url: String,
    store: CredentialStore,
    http_client: Client,
    refresh_interval: Duration,
}

impl TokenManager {
    /// Create a token manager writing into `store`
    pub fn new(
        config: &AppConfig,
        http_client: Client,
        store: CredentialStore,
        refresh_interval: Duration,
    ) -> Result<Self> {
        if refresh_interval.is_zero() {
            return Err(Error::config(
                "Token refresh interval must be greater than zero",
            ));
        }
        let token_url = build_url(&config.host, TENANT_TOKEN_PATH)?.to_string();
        Ok(Self {
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            token_url,
            store,
            http_client,
            refresh_interval,
        })
    }

    /// The credential slot this manager writes
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Period of the background refresh
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Fetch a new tenant token and store it
    ///
    /// On failure the previously stored credential (possibly empty) is left
    /// untouched.
    pub async fn authenticate(&self) -> Result<()> {
        let token = self.fetch_tenant_token().await?;
        self.store.replace(Credential::new(token)).await;
        info!("Got tenant_access_token");
        Ok(())
    }

    async fn fetch_tenant_token(&self) -> Result<String> {
        let form = [
            ("app_id", self.app_id.as_str()),
            ("app_secret", self.app_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if status != StatusCode::OK {
            debug!("Token endpoint answered {}: {}", status.as_u16(), body);
            return Err(Error::auth(format!(
                "Token request failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let parsed: TenantTokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("Malformed token response: {e}")))?;

        if let Some(code) = parsed.code.filter(|code| *code != 0) {
            return Err(Error::auth(format!(
                "Token endpoint returned code {code}: {}",
                parsed.msg
            )));
        }

        if let Some(expire) = parsed.expire {
            debug!("Tenant token valid for {}s", expire);
        }

        parsed
            .tenant_access_token
            .ok_or_else(|| Error::auth("Token response has no tenant_access_token"))
    }

    /// Authenticate once, then keep refreshing in the background
    ///
    /// The first call is awaited before this returns. Failures, including
    /// that first one, are logged and never stop the loop.
    pub async fn start_refresh_loop(self: &Arc<Self>) -> RefreshHandle {
        self.refresh_once().await;

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let period = self.refresh_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => manager.refresh_once().await,
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("Token refresh loop stopped");
        });

        RefreshHandle {
            shutdown_tx,
            task: Some(task),
        }
    }

    async fn refresh_once(&self) {
        if let Err(e) = self.authenticate().await {
            error!("Cannot get feishu token: {e}");
        }
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("app_id", &self.app_id)
            .field("token_url", &self.token_url)
            .field("refresh_interval", &self.refresh_interval)
            .finish_non_exhaustive()
    }
}

/// Owns the background refresh task
///
/// Dropping the handle aborts the task; [`RefreshHandle::shutdown`] stops it
/// gracefully and waits for it to exit.
#[derive(Debug)]
pub struct RefreshHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Whether the background task is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Signal the loop to stop and wait for it
    pub async fn shutdown(mut self) {
        self.shutdown_tx.send_replace(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Token refresh task ended abnormally: {e}");
                }
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
