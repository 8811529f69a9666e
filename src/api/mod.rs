//! Typed endpoint helpers
//!
//! Each submodule adds methods to [`FeishuClient`](crate::FeishuClient) that
//! build a request, run it through the executor or paginator, and decode the
//! payload into a concrete type.

mod approval;
mod calendar;
mod calendar_event;
mod card;
mod contact;
mod department;
mod document;
mod employee;
mod group;
mod login;
mod message;
mod robot;
mod space;
mod statistics;
mod vc;

pub use approval::{ApprovalInstance, TimelineNode};
pub use calendar::{Calendar, CalendarCreateRequest, CalendarPermission};
pub use calendar_event::{
    AttendeeAbility, AttendeeType, CalendarEvent, CalendarEventAttendee, CalendarEventRequest,
    EventLocation, EventTime, Reminder, RsvpStatus,
};
pub use card::{
    Action, ActionElement, ActionLayout, BackgroundStyle, Button, ButtonType, CardConfig,
    CardElement, CardExtra, CardHeader, CardOption, CardText, CardUrl, Column, ColumnSet,
    ColumnWidth, Confirm, DatePicker, Div, DivField, FlexMode, HeaderTemplate, HorizontalSpacing,
    Hr, Image, ImageMode, LarkMd, Markdown, MessageCard, Note, NoteElement, Overflow,
    PickerDatetime, PickerOptions, PickerTime, PlainText, SelectMenu, SelectPerson, SelectStatic,
    TextAlign, VerticalAlign,
};
pub use contact::UserInfo;
pub use department::DepartmentInfo;
pub use document::{BitableInfo, RecordInfo, TableInfo, BITABLE_BLOCK_TYPE};
pub use employee::{EmployeeInfo, EmployeeStatus, EmployeeType};
pub use group::{GroupInfo, GroupMember, SucceedType, MEMBER_BATCH_SIZE};
pub use login::{LoginSession, UserAccessToken};
pub use message::{MessageContent, ReceiverIdType};
pub use robot::RobotInfo;
pub use space::{NodeInfo, SpaceInfo};
pub use statistics::FileStatistics;
pub use vc::{MeetingSettings, Participant, VcReservation, VcReserveRequest};

#[cfg(test)]
mod tests;
