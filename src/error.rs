//! botscope error types.
//!
//! Failures fall into three operator-visible groups:
//!
//! - **Transport**: the classifier could not be reached or its reply could not
//!   be read ([`BotScopeError::Network`]).
//! - **Service-reported**: the classifier answered with its own `error`
//!   message ([`BotScopeError::Service`]), shown verbatim.
//! - **Local**: bad form input, a submission while one is already in flight,
//!   configuration problems.
//!
//! Missing or malformed confidence data is not an error at all; it is
//! defaulted in [`crate::confidence`].

use thiserror::Error;

/// botscope errors.
#[derive(Error, Debug)]
pub enum BotScopeError {
    /// Network communication with the classifier failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The classifier rejected the request and said why.
    #[error("{0}")]
    Service(String),

    /// Unknown form field or a value that does not parse for it.
    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        /// Field name as submitted.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Request body that could not be decoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A submission is already waiting on the classifier.
    #[error("A prediction is already in progress")]
    Busy,

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for botscope operations
pub type Result<T> = std::result::Result<T, BotScopeError>;

impl BotScopeError {
    /// Build an [`BotScopeError::InvalidField`].
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BotScopeError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Message for the dashboard's error banner.
    ///
    /// Service errors pass through untouched; everything else is prefixed
    /// with `Error:` and carries the underlying text.
    pub fn banner(&self) -> String {
        match self {
            BotScopeError::Service(msg) => msg.clone(),
            BotScopeError::Network(msg) => format!("Error: {msg}"),
            other => format!("Error: {other}"),
        }
    }
}

impl From<reqwest::Error> for BotScopeError {
    fn from(err: reqwest::Error) -> Self {
        BotScopeError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for BotScopeError {
    fn from(err: toml::de::Error) -> Self {
        BotScopeError::Config(err.to_string())
    }
}
