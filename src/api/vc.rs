//! Video meetings

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::pagination::{CursorPaginator, MAX_PAGE_SIZE};
use crate::types::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant listings carry their items under this field
const PARTICIPANTS_FIELD: &str = "participants";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeetingSettings {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub topic: String,
    pub auto_record: bool,
}

/// Body of a meeting reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VcReserveRequest {
    /// Unix seconds after which the reservation expires
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub meeting_settings: MeetingSettings,
}

impl VcReserveRequest {
    pub fn new(end_time: DateTime<Utc>) -> Self {
        Self {
            end_time: end_time.timestamp().to_string(),
            owner_id: None,
            meeting_settings: MeetingSettings::default(),
        }
    }

    /// Reserve on behalf of a user instead of the app
    #[must_use]
    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.meeting_settings.topic = topic.into();
        self
    }

    #[must_use]
    pub fn auto_record(mut self, auto_record: bool) -> Self {
        self.meeting_settings.auto_record = auto_record;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VcReservation {
    pub id: String,
    pub meeting_no: String,
    pub url: String,
    #[serde(default)]
    pub app_link: String,
    #[serde(default)]
    pub live_link: String,
    #[serde(default)]
    pub end_time: String,
}

/// The reservation arrives under `reserve`; older responses inline it
#[derive(Deserialize)]
#[serde(untagged)]
enum ReserveData {
    Wrapped { reserve: VcReservation },
    Inline(VcReservation),
}

impl From<ReserveData> for VcReservation {
    fn from(data: ReserveData) -> Self {
        match data {
            ReserveData::Wrapped { reserve } => reserve,
            ReserveData::Inline(reserve) => reserve,
        }
    }
}

/// One attendance record of a finished meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Participant {
    pub participant_name: String,
    pub department: String,
    pub user_id: String,
    pub employee_id: String,
    pub phone: String,
    pub email: String,
    pub device: String,
    pub app_version: String,
    pub public_ip: String,
    pub internal_ip: String,
    pub use_rtc_proxy: bool,
    pub location: String,
    pub network_type: String,
    pub protocol: String,
    pub microphone: String,
    pub speaker: String,
    pub camera: String,
    pub audio: bool,
    pub video: bool,
    pub sharing: bool,
    pub join_time: String,
    pub leave_time: String,
    pub time_in_meeting: String,
    pub leave_reason: String,
}

impl FeishuClient {
    /// Reserve a meeting room link
    pub async fn vc_reserve(&self, request: &VcReserveRequest) -> Result<VcReservation> {
        let config = RequestConfig::new().body(request)?;
        let data: ReserveData = self
            .request_as(Method::POST, "open-apis/vc/v1/reserves/apply", config)
            .await?;
        Ok(data.into())
    }

    /// Reserve a meeting with just a topic and an expiry
    pub async fn vc_reserve_with_topic(
        &self,
        topic: &str,
        end_time: DateTime<Utc>,
    ) -> Result<VcReservation> {
        self.vc_reserve(&VcReserveRequest::new(end_time).topic(topic))
            .await
    }

    /// Everyone who joined a meeting in the given window
    ///
    /// Times are unix seconds.
    pub async fn vc_query_participant_list(
        &self,
        meeting_start_time: i64,
        meeting_end_time: i64,
        meeting_no: &str,
    ) -> Result<Vec<Participant>> {
        let config = RequestConfig::new()
            .query("meeting_start_time", meeting_start_time.to_string())
            .query("meeting_end_time", meeting_end_time.to_string())
            .query("meeting_no", meeting_no);
        CursorPaginator::new(MAX_PAGE_SIZE)?
            .with_items_field(PARTICIPANTS_FIELD)
            .collect(
                self.http(),
                Method::GET,
                "open-apis/vc/v1/participant_list",
                config,
            )
            .await
    }
}
