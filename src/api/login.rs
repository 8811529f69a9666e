//! End-user login flows
//!
//! These exchange a one-time code for the identity of the signed-in user.

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::Method;
use serde::Deserialize;
use serde_json::json;

/// Result of a mini-program login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginSession {
    pub open_id: String,
    #[serde(default)]
    pub employee_id: String,
}

/// A user access token and its owner
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UserAccessToken {
    pub access_token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub user_id: String,
    pub open_id: String,
    /// Seconds of validity
    #[serde(default)]
    pub expires_in: i64,
}

impl std::fmt::Debug for UserAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccessToken")
            .field("name", &self.name)
            .field("user_id", &self.user_id)
            .field("open_id", &self.open_id)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl FeishuClient {
    /// Validate a mini-program login code
    pub async fn login_session(&self, code: &str) -> Result<LoginSession> {
        self.request_as(
            Method::POST,
            "open-apis/mina/v2/tokenLoginValidate",
            RequestConfig::new().json(json!({"code": code})),
        )
        .await
    }

    /// Exchange an OAuth authorization code for a user access token
    pub async fn user_access_token(&self, code: &str) -> Result<UserAccessToken> {
        self.request_as(
            Method::POST,
            "open-apis/authen/v1/access_token",
            RequestConfig::new().json(json!({
                "grant_type": "authorization_code",
                "code": code,
            })),
        )
        .await
    }
}
