//! The app's own bot

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::Method;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RobotInfo {
    pub app_name: String,
    pub open_id: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub activate_status: i64,
}

/// This endpoint puts `bot` beside `code`, not under `data`
#[derive(Deserialize)]
struct BotBody {
    bot: RobotInfo,
}

impl FeishuClient {
    /// Name and open id of the calling app's bot
    pub async fn robot_get_info(&self) -> Result<RobotInfo> {
        let body: BotBody = self
            .http()
            .request_body_as(Method::GET, "open-apis/bot/v3/info", RequestConfig::new())
            .await?;
        Ok(body.bot)
    }
}
