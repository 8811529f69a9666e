//! CLI module
//!
//! Command-line interface over the client core.
//!
//! # Commands
//!
//! - `token` - Fetch a tenant access token
//! - `request` - Send one request and print its data
//! - `list` - Fetch every page of a listing
//! - `send-text` - Send a text message

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
