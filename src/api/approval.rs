//! Approval instances

use crate::client::FeishuClient;
use crate::error::{Error, Result};
use crate::http::{encode_segment, RequestConfig};
use crate::types::Method;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One step of an instance's history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineNode {
    /// `START`, `PASS`, `REJECT`, `CC` and so on
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub open_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalInstance {
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
    /// `None` while the instance is still pending
    pub end_time: Option<DateTime<Utc>>,
    pub department_id: String,
    pub timeline: Vec<TimelineNode>,
    /// Form widgets, decoded from the JSON string the platform returns
    pub form: Vec<Map<String, Value>>,
}

#[derive(Deserialize)]
struct RawInstance {
    status: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default)]
    department_id: String,
    #[serde(default)]
    timeline: Vec<TimelineNode>,
    #[serde(default)]
    form: String,
}

impl TryFrom<RawInstance> for ApprovalInstance {
    type Error = Error;

    fn try_from(raw: RawInstance) -> Result<Self> {
        let form = if raw.form.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw.form)
                .map_err(|e| Error::decode(format!("approval form: {e}")))?
        };

        Ok(Self {
            status: raw.status,
            start_time: parse_millis("start_time", &raw.start_time)?,
            end_time: parse_millis("end_time", &raw.end_time)?,
            department_id: raw.department_id,
            timeline: raw.timeline,
            form,
        })
    }
}

/// Millisecond timestamps arrive as strings; `"0"` means unset
fn parse_millis(field: &str, raw: &str) -> Result<Option<DateTime<Utc>>> {
    if raw.is_empty() || raw == "0" {
        return Ok(None);
    }
    let millis: i64 = raw.parse().map_err(|_| {
        Error::decode(format!(
            "approval {field} is not a millisecond timestamp: '{raw}'"
        ))
    })?;
    Ok(DateTime::from_timestamp_millis(millis))
}

impl FeishuClient {
    /// Look up an approval instance by its code
    pub async fn approval_instance_by_id(&self, instance_code: &str) -> Result<ApprovalInstance> {
        let path = format!(
            "open-apis/approval/v4/instances/{}",
            encode_segment(instance_code)
        );
        let raw: RawInstance = self
            .request_as(Method::GET, &path, RequestConfig::new())
            .await?;
        ApprovalInstance::try_from(raw)
    }
}
