//! Error types for the Feishu API client
//!
//! Every public operation returns `Result<T, Error>`. An `Err` is what the
//! platform's own SDKs call an "absent result"; [`Error::kind`] tells the
//! causes apart without digging through logs.

use thiserror::Error;

/// The main error type for the Feishu API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Caller Input Errors
    // ============================================================================
    #[error("Page size {page_size} outside of allowed range {min}..={max}")]
    InvalidPageSize { page_size: u32, min: u32, max: u32 },

    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Invalid message card: {message}")]
    InvalidCard { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Response envelope has no numeric code: {body}")]
    MissingCode { body: String },

    #[error("API error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("Page reported has_more without a page_token")]
    MissingCursor,

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing configuration
    Config,
    /// Caller input rejected before any network activity
    Validation,
    /// Connection, timeout or URL construction failure
    Transport,
    /// Non-200 status or non-zero `code` from the platform
    Protocol,
    /// JSON encoding or decoding failure
    Serialization,
    /// Token issuance failure
    Auth,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a platform error from a non-zero envelope code
    pub fn api(code: i64, msg: impl Into<String>) -> Self {
        Self::Api {
            code,
            msg: msg.into(),
        }
    }

    /// Create an invalid card error
    pub fn invalid_card(message: impl Into<String>) -> Self {
        Self::InvalidCard {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::YamlParse(_)
            | Error::Io(_) => ErrorKind::Config,
            Error::InvalidPageSize { .. }
            | Error::UnsupportedMethod { .. }
            | Error::InvalidHeader { .. }
            | Error::InvalidCard { .. } => ErrorKind::Validation,
            Error::Http(_) | Error::Timeout { .. } | Error::InvalidUrl(_) => ErrorKind::Transport,
            Error::HttpStatus { .. }
            | Error::MissingCode { .. }
            | Error::Api { .. }
            | Error::MissingCursor => ErrorKind::Protocol,
            Error::JsonParse(_) | Error::Decode { .. } => ErrorKind::Serialization,
            Error::Auth { .. } => ErrorKind::Auth,
        }
    }

    /// The platform's envelope code, if the failure carried one
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias for the Feishu API client
pub type Result<T> = std::result::Result<T, Error>;
