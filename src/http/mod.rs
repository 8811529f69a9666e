//! HTTP module
//!
//! One request in, one normalized result out.
//!
//! # Features
//!
//! - **Default Headers**: bearer token and JSON content type on every call
//! - **Envelope Checking**: HTTP 200 and `code == 0` or an error
//! - **Typed Decoding**: `request_as::<T>` decodes `data` into caller schemas
//! - **Rate Limiting**: optional token bucket using governor

mod client;
mod envelope;
mod rate_limit;

pub use client::{build_url, encode_segment, HttpClient, RequestConfig, JSON_CONTENT_TYPE};
pub(crate) use envelope::decode_data;
pub use envelope::Envelope;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
