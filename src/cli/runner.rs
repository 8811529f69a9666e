//! CLI runner - executes commands

use crate::api::{MessageContent, ReceiverIdType};
use crate::cli::commands::{Cli, Commands};
use crate::client::FeishuClient;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::types::Method;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = FeishuClient::new(self.load_config()?)?;

        match &self.cli.command {
            Commands::Token => self.token(&client).await,
            Commands::Request {
                method,
                path,
                query,
                headers,
                body,
            } => {
                let method: Method = method.parse()?;
                let config = build_request_config(query, headers, body.as_deref())?;
                client.authenticate().await?;
                let data = client.request(method, path, config).await?;
                print_json(&data)
            }
            Commands::List {
                path,
                query,
                page_size,
            } => {
                let config = build_request_config(query, &[], None)?;
                client.authenticate().await?;
                let items = client
                    .get_all_pages(Method::GET, path, config, *page_size)
                    .await?;
                if self.cli.verbose {
                    eprintln!("Fetched {} items", items.len());
                }
                print_json(&Value::Array(items))
            }
            Commands::SendText {
                receive_id,
                text,
                id_type,
            } => {
                let id_type: ReceiverIdType = id_type.parse()?;
                client.authenticate().await?;
                let message_id = client
                    .message_send(id_type, receive_id, &MessageContent::Text(text.clone()))
                    .await?;
                print_json(&json!({ "message_id": message_id }))
            }
        }
    }

    /// Load app configuration from the file flag or the environment
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => AppConfig::from_file(path),
            None => AppConfig::from_env(),
        }
    }

    async fn token(&self, client: &FeishuClient) -> Result<()> {
        client.authenticate().await?;
        let credential = client.credential().await;
        let obtained_at = credential
            .obtained_at()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        let mut report = json!({
            "status": "SUCCEEDED",
            "app_id": client.config().app_id,
            "obtained_at": obtained_at,
        });
        if self.cli.verbose {
            report["host"] = json!(client.config().host);
        }
        print_json(&report)
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Split `key=value`; the value may itself contain `=`
fn parse_pair(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| Error::config(format!("Expected key=value, got '{raw}'")))
}

fn build_request_config(
    query: &[String],
    headers: &[String],
    body: Option<&str>,
) -> Result<RequestConfig> {
    let mut config = RequestConfig::new();
    for raw in query {
        let (key, value) = parse_pair(raw)?;
        config = config.query(key, value);
    }
    for raw in headers {
        let (key, value) = parse_pair(raw)?;
        config = config.header(key, value);
    }
    if let Some(body) = body {
        let body: Value = serde_json::from_str(body)
            .map_err(|e| Error::config(format!("Invalid body JSON: {e}")))?;
        config = config.json(body);
    }
    Ok(config)
}
