//! Drive file statistics

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::{encode_segment, RequestConfig};
use crate::types::Method;
use serde::Deserialize;

/// Visit counters of one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FileStatistics {
    /// Distinct visitors
    #[serde(default)]
    pub uv: i64,
    /// Visits; repeat visits within half an hour count once
    #[serde(default)]
    pub pv: i64,
    /// `-1` for file types without likes
    #[serde(default)]
    pub like_count: i64,
    /// Unix seconds the counters were taken at
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Deserialize)]
struct StatisticsData {
    statistics: FileStatistics,
}

impl FeishuClient {
    /// Statistics of a drive file
    ///
    /// `file_type` is the platform's type name: `doc`, `docx`, `sheet`,
    /// `bitable`, `mindnote`, `wiki` or `file`.
    pub async fn statistics_get_all_info(
        &self,
        file_token: &str,
        file_type: &str,
    ) -> Result<FileStatistics> {
        let path = format!(
            "open-apis/drive/v1/files/{}/statistics",
            encode_segment(file_token)
        );
        let config = RequestConfig::new().query("file_type", file_type);
        let data: StatisticsData = self.request_as(Method::GET, &path, config).await?;
        Ok(data.statistics)
    }
}
