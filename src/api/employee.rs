//! Employee directory (EHR)

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::RequestConfig;
use crate::pagination::MAX_PAGE_SIZE;
use crate::types::{Method, UserIdType};
use serde::Deserialize;

/// Employment type as numbered by the EHR API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum EmployeeType {
    FullTime = 1,
    Internship = 2,
    Consultant = 3,
    OutSourcing = 4,
    Laboring = 5,
}

impl TryFrom<u8> for EmployeeType {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::FullTime),
            2 => Ok(Self::Internship),
            3 => Ok(Self::Consultant),
            4 => Ok(Self::OutSourcing),
            5 => Ok(Self::Laboring),
            other => Err(format!("unknown employee_type {other}")),
        }
    }
}

/// Employment status as numbered by the EHR API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum EmployeeStatus {
    BeforeJob = 1,
    AtJob = 2,
    DenyJob = 3,
    BeforeLeave = 4,
    Left = 5,
}

impl TryFrom<u8> for EmployeeStatus {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::BeforeJob),
            2 => Ok(Self::AtJob),
            3 => Ok(Self::DenyJob),
            4 => Ok(Self::BeforeLeave),
            5 => Ok(Self::Left),
            other => Err(format!("unknown employee status {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeInfo {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub employee_type: EmployeeType,
    pub status: EmployeeStatus,
}

#[derive(Deserialize)]
struct EmployeeItem {
    user_id: String,
    system_fields: SystemFields,
}

#[derive(Deserialize)]
struct SystemFields {
    name: String,
    #[serde(default)]
    department_id: String,
    employee_type: EmployeeType,
    status: EmployeeStatus,
}

impl From<EmployeeItem> for EmployeeInfo {
    fn from(item: EmployeeItem) -> Self {
        Self {
            id: item.user_id,
            name: item.system_fields.name,
            department_id: item.system_fields.department_id,
            employee_type: item.system_fields.employee_type,
            status: item.system_fields.status,
        }
    }
}

impl FeishuClient {
    /// Every employee in the tenant, ids of the requested type
    pub async fn employee_get_all_info(&self, id_type: UserIdType) -> Result<Vec<EmployeeInfo>> {
        let items: Vec<EmployeeItem> = self
            .get_all_pages_as(
                Method::GET,
                "open-apis/ehr/v1/employees",
                RequestConfig::new().query("user_id_type", id_type.as_str()),
                MAX_PAGE_SIZE,
            )
            .await?;
        Ok(items.into_iter().map(EmployeeInfo::from).collect())
    }
}
