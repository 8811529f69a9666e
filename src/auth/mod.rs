//! Authentication module
//!
//! The client authenticates as a self-built app: `app_id` and `app_secret`
//! are exchanged for a tenant access token, which is sent as a bearer token
//! on every other call and refreshed on a fixed period.

mod token_manager;
mod types;

pub use token_manager::{RefreshHandle, TokenManager, TENANT_TOKEN_PATH};
pub use types::{Credential, CredentialStore};
