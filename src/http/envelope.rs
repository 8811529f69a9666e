//! Response envelope
//!
//! Every open-platform response is wrapped as `{code, msg, data}` where
//! `code == 0` means success.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

/// The outer object of every API response
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T = Value> {
    /// Status code, 0 on success
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable status message
    #[serde(default)]
    pub msg: String,
    /// Payload, shape depends on the endpoint
    pub data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parse a raw response body
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| {
            error!("Cannot parse response envelope: {e}; body: {body}");
            Error::JsonParse(e)
        })
    }
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Check the code and hand out the payload
    ///
    /// `raw` is the original body, kept for the `MissingCode` error.
    pub fn into_data(self, raw: &str) -> Result<Option<T>> {
        match self.code {
            Some(0) => Ok(self.data),
            Some(code) => Err(Error::api(code, self.msg)),
            None => Err(Error::MissingCode {
                body: raw.to_string(),
            }),
        }
    }
}

/// Decode a `data` payload into a caller schema
pub(crate) fn decode_data<T: DeserializeOwned>(path: &str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| {
        error!("Cannot decode response of {}: {}", path, e);
        Error::decode(format!("{path}: {e}"))
    })
}
