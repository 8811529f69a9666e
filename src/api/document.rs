//! Documents and the bitables embedded in them

use crate::client::FeishuClient;
use crate::error::Result;
use crate::http::{encode_segment, RequestConfig};
use crate::pagination::MAX_PAGE_SIZE;
use crate::types::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Block type of an embedded bitable
pub const BITABLE_BLOCK_TYPE: i64 = 18;

/// A bitable embedded in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitableInfo {
    pub block_id: String,
    pub app_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableInfo {
    pub table_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordInfo {
    pub record_id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct Block {
    block_id: String,
    block_type: i64,
    #[serde(default)]
    bitable: Option<BitableBlock>,
}

#[derive(Deserialize)]
struct BitableBlock {
    #[serde(default)]
    token: String,
}

impl Block {
    /// The block token is `<app_token>_<table_id>`
    fn into_bitable(self) -> Option<BitableInfo> {
        if self.block_type != BITABLE_BLOCK_TYPE {
            return None;
        }
        let token = self.bitable?.token;
        let app_token = token.split('_').next().unwrap_or_default().to_string();
        Some(BitableInfo {
            block_id: self.block_id,
            app_token,
        })
    }
}

impl FeishuClient {
    /// Every bitable embedded in a document, in block order
    pub async fn document_get_all_bitables(&self, document_id: &str) -> Result<Vec<BitableInfo>> {
        let path = format!(
            "open-apis/docx/v1/documents/{}/blocks",
            encode_segment(document_id)
        );
        let blocks: Vec<Block> = self
            .get_all_pages_as(Method::GET, &path, RequestConfig::new(), MAX_PAGE_SIZE)
            .await?;
        Ok(blocks.into_iter().filter_map(Block::into_bitable).collect())
    }

    /// Every table of a bitable app
    pub async fn bitable_get_all_tables(&self, app_token: &str) -> Result<Vec<TableInfo>> {
        let path = format!(
            "open-apis/bitable/v1/apps/{}/tables",
            encode_segment(app_token)
        );
        self.get_all_pages_as(Method::GET, &path, RequestConfig::new(), MAX_PAGE_SIZE)
            .await
    }

    /// Every record of one table
    pub async fn bitable_get_all_records(
        &self,
        app_token: &str,
        table_id: &str,
    ) -> Result<Vec<RecordInfo>> {
        let path = format!(
            "open-apis/bitable/v1/apps/{}/tables/{}/records",
            encode_segment(app_token),
            encode_segment(table_id)
        );
        self.get_all_pages_as(Method::GET, &path, RequestConfig::new(), MAX_PAGE_SIZE)
            .await
    }
}
