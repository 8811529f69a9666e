//! Calendar events and their attendees

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::{encode_segment, RequestConfig};
use crate::pagination::MAX_PAGE_SIZE;
use crate::types::{Method, UserIdType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A point in time as the calendar API encodes it: unix seconds as a string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    /// Set instead of `timestamp` for all-day events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventTime {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            timestamp: time.timestamp().to_string(),
            date: None,
        }
    }
}

/// What invitees may do with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeAbility {
    None,
    #[default]
    CanSeeOthers,
    CanInviteOthers,
    CanModifyEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLocation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Vchat {
    vc_type: &'static str,
}

/// Body of an event creation
///
/// New events get a video meeting, notify attendees and remind them five
/// minutes ahead unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEventRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    need_notification: bool,
    start_time: EventTime,
    end_time: EventTime,
    vchat: Vchat,
    attendee_ability: AttendeeAbility,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<EventLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reminders: Vec<Reminder>,
}

impl CalendarEventRequest {
    pub fn new(summary: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            summary: summary.into(),
            description: String::new(),
            need_notification: true,
            start_time: EventTime::at(start),
            end_time: EventTime::at(end),
            vchat: Vchat { vc_type: "vc" },
            attendee_ability: AttendeeAbility::default(),
            location: None,
            reminders: vec![Reminder { minutes: 5 }],
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn need_notification(mut self, notify: bool) -> Self {
        self.need_notification = notify;
        self
    }

    #[must_use]
    pub fn attendee_ability(mut self, ability: AttendeeAbility) -> Self {
        self.attendee_ability = ability;
        self
    }

    #[must_use]
    pub fn location(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.location = Some(EventLocation {
            name: name.into(),
            address: address.into(),
        });
        self
    }

    /// Replace the reminders; an empty slice removes them all
    #[must_use]
    pub fn reminders(mut self, minutes: &[i32]) -> Self {
        self.reminders = minutes.iter().map(|&minutes| Reminder { minutes }).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarEvent {
    pub event_id: String,
    #[serde(default)]
    pub organizer_calendar_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub need_notification: bool,
    #[serde(default)]
    pub start_time: EventTime,
    #[serde(default)]
    pub end_time: EventTime,
    #[serde(default)]
    pub location: Option<EventLocation>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeType {
    User,
    Chat,
    Resource,
    ThirdParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    NeedsAction,
    Accept,
    Tentative,
    Decline,
    Removed,
}

/// An invitee: a user, a group chat, a meeting room or an outside email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventAttendee {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attendee_type: Option<AttendeeType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attendee_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chat_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub room_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub third_party_email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operate_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_status: Option<RsvpStatus>,
}

impl CalendarEventAttendee {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            attendee_type: Some(AttendeeType::User),
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn chat(chat_id: impl Into<String>) -> Self {
        Self {
            attendee_type: Some(AttendeeType::Chat),
            chat_id: chat_id.into(),
            ..Self::default()
        }
    }

    pub fn resource(room_id: impl Into<String>) -> Self {
        Self {
            attendee_type: Some(AttendeeType::Resource),
            room_id: room_id.into(),
            ..Self::default()
        }
    }

    pub fn third_party(email: impl Into<String>) -> Self {
        Self {
            attendee_type: Some(AttendeeType::ThirdParty),
            third_party_email: email.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct EventData {
    event: CalendarEvent,
}

#[derive(Deserialize)]
struct AttendeesData {
    #[serde(default)]
    attendees: Vec<CalendarEventAttendee>,
}

fn events_path(calendar_id: &str) -> String {
    format!(
        "open-apis/calendar/v4/calendars/{}/events",
        encode_segment(calendar_id)
    )
}

fn attendees_path(calendar_id: &str, event_id: &str) -> String {
    format!(
        "{}/{}/attendees",
        events_path(calendar_id),
        encode_segment(event_id)
    )
}

impl FeishuClient {
    /// Create an event on a calendar
    pub async fn calendar_event_create(
        &self,
        calendar_id: &str,
        request: &CalendarEventRequest,
    ) -> Result<CalendarEvent> {
        let config = RequestConfig::new().body(request)?;
        let data: EventData = self
            .request_as(Method::POST, &events_path(calendar_id), config)
            .await?;
        Ok(data.event)
    }

    /// Events of a calendar from now on
    pub async fn calendar_event_list(&self, calendar_id: &str) -> Result<Vec<CalendarEvent>> {
        self.calendar_event_list_from(calendar_id, Utc::now()).await
    }

    /// Events of a calendar from `anchor` on
    pub async fn calendar_event_list_from(
        &self,
        calendar_id: &str,
        anchor: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let config = RequestConfig::new().query("anchor_time", anchor.timestamp().to_string());
        self.get_all_pages_as(Method::GET, &events_path(calendar_id), config, MAX_PAGE_SIZE)
            .await
    }

    /// Invite attendees, returning them as the platform recorded them
    pub async fn calendar_event_attendee_create(
        &self,
        calendar_id: &str,
        event_id: &str,
        user_id_type: UserIdType,
        attendees: &[CalendarEventAttendee],
        need_notification: bool,
    ) -> Result<Vec<CalendarEventAttendee>> {
        let config = RequestConfig::new()
            .query("user_id_type", user_id_type.as_str())
            .json(json!({
                "attendees": attendees,
                "need_notification": need_notification,
            }));
        let data: AttendeesData = self
            .request_as(Method::POST, &attendees_path(calendar_id, event_id), config)
            .await?;
        Ok(data.attendees)
    }

    /// Every attendee of an event
    pub async fn calendar_event_attendee_query(
        &self,
        calendar_id: &str,
        event_id: &str,
        user_id_type: UserIdType,
    ) -> Result<Vec<CalendarEventAttendee>> {
        let config = RequestConfig::new().query("user_id_type", user_id_type.as_str());
        self.get_all_pages_as(
            Method::GET,
            &attendees_path(calendar_id, event_id),
            config,
            MAX_PAGE_SIZE,
        )
        .await
    }
}
