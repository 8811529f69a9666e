//! Calendars

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::{encode_segment, RequestConfig};
use crate::types::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Who can see a calendar's events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarPermission {
    #[default]
    Private,
    ShowOnlyFreeBusy,
    Public,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarCreateRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub permissions: CalendarPermission,
}

impl CalendarCreateRequest {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: CalendarPermission) -> Self {
        self.permissions = permissions;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Calendar {
    pub calendar_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: CalendarPermission,
}

#[derive(Deserialize)]
struct CalendarData {
    calendar: Calendar,
}

impl FeishuClient {
    /// Create a shared calendar owned by the app
    pub async fn calendar_create(&self, request: &CalendarCreateRequest) -> Result<Calendar> {
        let config = RequestConfig::new().body(request)?;
        let data: CalendarData = self
            .request_as(Method::POST, "open-apis/calendar/v4/calendars", config)
            .await?;
        Ok(data.calendar)
    }

    /// Subscribe a user to a calendar, authorized with that user's token
    pub async fn calendar_subscribe(&self, calendar_id: &str, user_access_token: &str) -> Result<()> {
        let path = format!(
            "open-apis/calendar/v4/calendars/{}/subscribe",
            encode_segment(calendar_id)
        );
        let config = RequestConfig::new()
            .header("Authorization", format!("Bearer {user_access_token}"))
            .json(json!({}));
        self.request(Method::POST, &path, config).await?;
        Ok(())
    }
}
