//! Group chats
//!
//! Membership changes are sent in batches because the platform accepts at
//! most 50 ids per call.

use crate::client::FeishuClient;
use crate::error::{Error, Result};
use crate::http::{encode_segment, RequestConfig};
use crate::pagination::MAX_PAGE_SIZE;
use crate::types::{Method, UserIdType};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Maximum ids per membership call
pub const MEMBER_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub chat_id: String,
    pub name: String,
    #[serde(default)]
    pub tenant_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupMember {
    pub member_id: String,
    #[serde(default)]
    pub name: String,
}

/// How the platform treats unusable ids when adding members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SucceedType {
    /// Fail on unknown ids, skip resigned ones
    #[default]
    Default,
    /// Add every usable id and report the rest
    AddAvailable,
    /// Fail if any id is unusable
    AllOrNothing,
}

impl SucceedType {
    fn as_param(self) -> &'static str {
        match self {
            SucceedType::Default => "0",
            SucceedType::AddAvailable => "1",
            SucceedType::AllOrNothing => "2",
        }
    }
}

impl FeishuClient {
    /// Every group chat the bot is in
    pub async fn group_get_all_info(&self) -> Result<Vec<GroupInfo>> {
        self.get_all_pages_as(
            Method::GET,
            "open-apis/im/v1/chats",
            RequestConfig::new(),
            MAX_PAGE_SIZE,
        )
        .await
    }

    /// One group chat
    pub async fn group_get_info(&self, chat_id: &str) -> Result<GroupInfo> {
        let path = format!("open-apis/im/v1/chats/{}", encode_segment(chat_id));
        let mut info: GroupInfo = self
            .request_as(
                Method::GET,
                &path,
                RequestConfig::new().query("user_id_type", UserIdType::OpenId.as_str()),
            )
            .await?;
        // The detail endpoint omits the id it was asked about.
        info.chat_id = chat_id.to_string();
        Ok(info)
    }

    /// Every member of a group chat
    pub async fn group_get_members(
        &self,
        chat_id: &str,
        id_type: UserIdType,
    ) -> Result<Vec<GroupMember>> {
        let path = format!("open-apis/im/v1/chats/{}/members", encode_segment(chat_id));
        self.get_all_pages_as(
            Method::GET,
            &path,
            RequestConfig::new().query("member_id_type", id_type.as_str()),
            MAX_PAGE_SIZE,
        )
        .await
    }

    /// Create a group chat owned by `owner_id`
    pub async fn group_create(
        &self,
        name: &str,
        id_type: UserIdType,
        owner_id: &str,
    ) -> Result<GroupInfo> {
        let config = RequestConfig::new()
            .query("user_id_type", id_type.as_str())
            .json(json!({"name": name, "owner_id": owner_id}));
        self.request_as(Method::POST, "open-apis/im/v1/chats", config)
            .await
    }

    /// Add members (users or bots by app id) in batches
    ///
    /// Every batch is attempted; the first failure is returned.
    pub async fn group_add_members(
        &self,
        chat_id: &str,
        id_type: UserIdType,
        succeed_type: SucceedType,
        ids: &[String],
    ) -> Result<()> {
        let path = format!("open-apis/im/v1/chats/{}/members", encode_segment(chat_id));
        let config = RequestConfig::new()
            .query("member_id_type", id_type.as_str())
            .query("succeed_type", succeed_type.as_param());
        self.member_batches(Method::POST, &path, config, ids).await
    }

    /// Remove members in batches
    ///
    /// Every batch is attempted; the first failure is returned.
    pub async fn group_delete_members(
        &self,
        chat_id: &str,
        id_type: UserIdType,
        ids: &[String],
    ) -> Result<()> {
        let path = format!("open-apis/im/v1/chats/{}/members", encode_segment(chat_id));
        let config = RequestConfig::new().query("member_id_type", id_type.as_str());
        self.member_batches(Method::DELETE, &path, config, ids).await
    }

    /// Transfer group ownership
    pub async fn group_change_owner(
        &self,
        chat_id: &str,
        id_type: UserIdType,
        owner_id: &str,
    ) -> Result<()> {
        let path = format!("open-apis/im/v1/chats/{}", encode_segment(chat_id));
        let config = RequestConfig::new()
            .query("user_id_type", id_type.as_str())
            .json(json!({"owner_id": owner_id}));
        self.request(Method::PUT, &path, config).await?;
        Ok(())
    }

    async fn member_batches(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
        ids: &[String],
    ) -> Result<()> {
        let mut first_error: Option<Error> = None;

        for batch in ids.chunks(MEMBER_BATCH_SIZE) {
            let request = config.clone().json(json!({"id_list": batch}));
            if let Err(e) = self.request(method, path, request).await {
                warn!("{} {} failed for {} ids: {}", method, path, batch.len(), e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
