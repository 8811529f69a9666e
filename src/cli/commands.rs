//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Feishu open platform client
#[derive(Parser, Debug)]
#[command(name = "feishu-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// App configuration file (YAML); falls back to FEISHU_* variables
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a tenant access token once
    Token,

    /// Send one request and print its data
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,

        /// Path below the host, e.g. open-apis/im/v1/chats
        path: String,

        /// Query parameter (key=value), repeatable
        #[arg(short, long = "query")]
        query: Vec<String>,

        /// Extra header (key=value), repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },

    /// Fetch every page of a listing
    List {
        /// Path below the host
        path: String,

        /// Query parameter (key=value), repeatable
        #[arg(short, long = "query")]
        query: Vec<String>,

        /// Items per page (10-100)
        #[arg(long, default_value = "100")]
        page_size: u32,
    },

    /// Send a text message
    SendText {
        /// Receiver id
        receive_id: String,

        /// Message text
        text: String,

        /// Receiver id type (open_id, union_id, user_id, email, chat_id)
        #[arg(long, default_value = "open_id")]
        id_type: String,
    },
}
