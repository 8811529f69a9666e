//! Contact lookups

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::{encode_segment, RequestConfig};
use crate::types::{Method, UserIdType};
use serde::Deserialize;

/// A user as seen by the contact and search APIs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub union_id: String,
    #[serde(default)]
    pub open_id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub department_ids: Vec<String>,
}

#[derive(Deserialize)]
struct UserData {
    user: UserInfo,
}

#[derive(Deserialize)]
struct UserSearchData {
    #[serde(default)]
    users: Vec<UserInfo>,
}

impl FeishuClient {
    /// Look up a user by id
    pub async fn user_info_by_id(&self, user_id: &str, id_type: UserIdType) -> Result<UserInfo> {
        let path = format!("open-apis/contact/v3/users/{}", encode_segment(user_id));
        let data: UserData = self
            .request_as(
                Method::GET,
                &path,
                RequestConfig::new().query("user_id_type", id_type.as_str()),
            )
            .await?;
        Ok(data.user)
    }

    /// Search users by display name
    pub async fn user_search(&self, name: &str) -> Result<Vec<UserInfo>> {
        let data: UserSearchData = self
            .request_as(
                Method::GET,
                "open-apis/search/v1/user",
                RequestConfig::new().query("query", name),
            )
            .await?;
        Ok(data.users)
    }

    /// First user whose display name matches `name`, if any
    pub async fn user_info_by_name(&self, name: &str) -> Result<Option<UserInfo>> {
        Ok(self.user_search(name).await?.into_iter().next())
    }
}
