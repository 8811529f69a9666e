//! Knowledge spaces (wiki)

use crate::client::FeishuClient;
use crate::error::{Error, Result};
use crate::http::{encode_segment, RequestConfig};
use crate::pagination::MIN_PAGE_SIZE;
use crate::types::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpaceInfo {
    pub space_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeInfo {
    pub node_token: String,
    #[serde(default)]
    pub obj_token: String,
    #[serde(default)]
    pub obj_type: String,
    #[serde(default)]
    pub parent_node_token: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub has_child: bool,
}

#[derive(Deserialize)]
struct SpaceData {
    space: SpaceInfo,
}

#[derive(Deserialize)]
struct NodeData {
    node: NodeInfo,
}

impl FeishuClient {
    /// Create a knowledge space on behalf of a user
    ///
    /// Spaces are owned by users, so this call is authorized with the
    /// user's access token instead of the tenant token.
    pub async fn knowledge_space_create(
        &self,
        name: &str,
        description: &str,
        user_access_token: &str,
    ) -> Result<SpaceInfo> {
        let config = RequestConfig::new()
            .header("Authorization", format!("Bearer {user_access_token}"))
            .json(json!({"name": name, "description": description}));
        let data: SpaceData = self
            .request_as(Method::POST, "open-apis/wiki/v2/spaces", config)
            .await?;
        Ok(data.space)
    }

    /// Add members one by one
    ///
    /// `member_type` is one of `openchat`, `userid`, `unionid`,
    /// `opendepartmentid`. Every member is attempted; the first failure is
    /// returned.
    pub async fn knowledge_space_add_members(
        &self,
        space_id: &str,
        member_type: &str,
        member_ids: &[String],
    ) -> Result<()> {
        self.add_space_members(space_id, member_type, "member", member_ids, RequestConfig::new())
            .await
    }

    /// Make bots administrators of a space
    ///
    /// Only a space administrator may grant the role, so the call carries
    /// that user's access token.
    pub async fn knowledge_space_add_bots_as_admin(
        &self,
        space_id: &str,
        bot_open_ids: &[String],
        user_access_token: &str,
    ) -> Result<()> {
        let config =
            RequestConfig::new().header("Authorization", format!("Bearer {user_access_token}"));
        self.add_space_members(space_id, "openid", "admin", bot_open_ids, config)
            .await
    }

    async fn add_space_members(
        &self,
        space_id: &str,
        member_type: &str,
        member_role: &str,
        member_ids: &[String],
        base: RequestConfig,
    ) -> Result<()> {
        let path = format!("open-apis/wiki/v2/spaces/{}/members", encode_segment(space_id));
        let mut first_error: Option<Error> = None;

        for member_id in member_ids {
            let config = base.clone().json(json!({
                "member_type": member_type,
                "member_role": member_role,
                "member_id": member_id,
            }));
            if let Err(e) = self.request(Method::POST, &path, config).await {
                warn!("Adding {} to space {} failed: {}", member_id, space_id, e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Copy a node into another space (or elsewhere in the same one)
    ///
    /// Without a `title` the copy keeps the source title.
    pub async fn knowledge_space_copy_node(
        &self,
        space_id: &str,
        node_token: &str,
        target_space_id: &str,
        target_parent_token: &str,
        title: Option<&str>,
    ) -> Result<NodeInfo> {
        let path = format!(
            "open-apis/wiki/v2/spaces/{}/nodes/{}/copy",
            encode_segment(space_id),
            encode_segment(node_token)
        );
        let mut body = json!({
            "target_parent_token": target_parent_token,
            "target_space_id": target_space_id,
        });
        if let Some(title) = title {
            body["title"] = json!(title);
        }

        let data: NodeData = self
            .request_as(Method::POST, &path, RequestConfig::new().json(body))
            .await?;
        Ok(data.node)
    }

    /// Every node of a space, optionally below one parent node
    pub async fn knowledge_space_get_all_nodes(
        &self,
        space_id: &str,
        parent_node_token: Option<&str>,
    ) -> Result<Vec<NodeInfo>> {
        let path = format!("open-apis/wiki/v2/spaces/{}/nodes", encode_segment(space_id));
        let mut config = RequestConfig::new();
        if let Some(parent) = parent_node_token {
            config = config.query("parent_node_token", parent);
        }
        self.get_all_pages_as(Method::GET, &path, config, MIN_PAGE_SIZE)
            .await
    }

    /// Resolve a wiki node token
    pub async fn knowledge_space_get_node_info(&self, token: &str) -> Result<NodeInfo> {
        let data: NodeData = self
            .request_as(
                Method::GET,
                "open-apis/wiki/v2/spaces/get_node",
                RequestConfig::new().query("token", token),
            )
            .await?;
        Ok(data.node)
    }
}
