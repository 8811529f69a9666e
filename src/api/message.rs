//! Instant messages

use crate::client::FeishuClient;
use crate::error::{Error, Result};
use crate::http::{encode_segment, RequestConfig};
use crate::types::Method;
use serde::Deserialize;
use serde_json::{json, Value};

/// Which identifier `receive_id` is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiverIdType {
    #[default]
    OpenId,
    UnionId,
    UserId,
    Email,
    ChatId,
}

impl ReceiverIdType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiverIdType::OpenId => "open_id",
            ReceiverIdType::UnionId => "union_id",
            ReceiverIdType::UserId => "user_id",
            ReceiverIdType::Email => "email",
            ReceiverIdType::ChatId => "chat_id",
        }
    }
}

impl std::str::FromStr for ReceiverIdType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open_id" => Ok(Self::OpenId),
            "union_id" => Ok(Self::UnionId),
            "user_id" => Ok(Self::UserId),
            "email" => Ok(Self::Email),
            "chat_id" => Ok(Self::ChatId),
            other => Err(Error::config(format!("Unknown receive id type '{other}'"))),
        }
    }
}

/// Message body
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// A message card
    Interactive(Value),
}

impl MessageContent {
    pub fn msg_type(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Interactive(_) => "interactive",
        }
    }

    /// The `content` field: a JSON document encoded as a string
    pub fn encode(&self) -> Result<String> {
        let encoded = match self {
            MessageContent::Text(text) => serde_json::to_string(&json!({"text": text})),
            MessageContent::Interactive(card) => serde_json::to_string(card),
        };
        encoded.map_err(Error::JsonParse)
    }
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: String,
}

impl FeishuClient {
    /// Send a message to a user or chat, returning its message id
    pub async fn message_send(
        &self,
        receive_id_type: ReceiverIdType,
        receive_id: &str,
        content: &MessageContent,
    ) -> Result<String> {
        let config = RequestConfig::new()
            .query("receive_id_type", receive_id_type.as_str())
            .json(json!({
                "receive_id": receive_id,
                "content": content.encode()?,
                "msg_type": content.msg_type(),
            }));

        let sent: SentMessage = self
            .request_as(Method::POST, "open-apis/im/v1/messages", config)
            .await?;
        Ok(sent.message_id)
    }

    /// Replace the content of a sent card message
    pub async fn message_update(&self, message_id: &str, content: &str) -> Result<()> {
        let path = format!("open-apis/im/v1/messages/{}", encode_segment(message_id));
        self.request(
            Method::PATCH,
            &path,
            RequestConfig::new().json(json!({"content": content})),
        )
        .await?;
        Ok(())
    }
}
