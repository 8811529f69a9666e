//! Department lookups

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::{encode_segment, RequestConfig};
use crate::types::Method;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DepartmentInfo {
    pub name: String,
    /// Department group chat, empty if the department has none
    #[serde(rename = "chat_id", default)]
    pub group_id: String,
    #[serde(default)]
    pub member_count: u32,
}

#[derive(Deserialize)]
struct DepartmentData {
    department: DepartmentInfo,
}

impl FeishuClient {
    /// Fetch one department
    pub async fn department_info_by_id(&self, department_id: &str) -> Result<DepartmentInfo> {
        let path = format!("open-apis/contact/v3/departments/{}", encode_segment(department_id));
        let data: DepartmentData = self
            .request_as(Method::GET, &path, RequestConfig::new())
            .await?;
        Ok(data.department)
    }
}
