// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Feishu API
//!
//! Client core for the Feishu (Lark) open platform REST API.
//!
//! ## Features
//!
//! - **Tenant credentials**: fetched at startup and refreshed every 105 minutes
//!   in a cancellable background task
//! - **Request executor**: one round trip with bearer injection, a 15 second
//!   timeout and envelope validation (`code == 0`)
//! - **Cursor pagination**: follows `page_token` until `has_more` is false,
//!   all-or-nothing
//! - **Typed endpoints**: contacts, groups, messages, employees, login,
//!   knowledge spaces, approvals, calendars, bitables, robot info, file
//!   statistics and video meetings
//! - **Message cards**: a validating builder for interactive card content
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feishu_api::{AppConfig, FeishuClient, Method, Result};
//! use feishu_api::http::RequestConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = FeishuClient::new(AppConfig::from_file("app.yaml")?)?;
//!     client.start().await;
//!
//!     let chats = client
//!         .get_all_pages(Method::GET, "open-apis/im/v1/chats", RequestConfig::new(), 100)
//!         .await?;
//!     println!("{} chats", chats.len());
//!
//!     client.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FeishuClient                          │
//! │   start() / shutdown()   request()   get_all_pages()  api::* │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────────────┬────────┴───────────┬────────────────────┐
//! │        Auth        │        HTTP        │     Pagination     │
//! ├────────────────────┼────────────────────┼────────────────────┤
//! │ TokenManager       │ HttpClient         │ CursorPaginator    │
//! │ CredentialStore    │ Envelope           │ Page / PageSize    │
//! │ RefreshHandle      │ RateLimiter (opt)  │                    │
//! └────────────────────┴────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// App configuration and client settings
pub mod config;

/// Tenant credential management
pub mod auth;

/// Request executor and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// The client facade
pub mod client;

/// Typed endpoint helpers
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::FeishuClient;
pub use config::{AppConfig, ClientSettings};
pub use error::{Error, ErrorKind, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
