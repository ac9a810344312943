//! # botscope - Bot Detection Dashboard
//!
//! Collects public metrics of a social media account, asks a remote
//! classifier whether the account is a bot, and explains the answer.
//!
//! The classifier is an external service and only says bot or human. botscope
//! adds the parts an operator reads:
//!
//! - **Reasoning**: fixed threshold rules over the submitted metrics, turned
//!   into plain sentences ([`reasoning`]).
//! - **Confidence**: the service's probabilities scaled to a 0-100 display
//!   percentage and a Very Low..Very High label ([`confidence`]).
//! - **Dashboard**: form, tooltip, verdict, error banner and the last ten
//!   verdicts as one state record with explicit transitions ([`dashboard`]).
//!
//! ## Flow
//!
//! ```text
//! Operator              botscope                    Classifier
//!    |                     |                            |
//!    |-- metrics --------->|                            |
//!    |                     |-- POST /api/predict ------>|
//!    |                     |<-- is_bot, probability ----|
//!    |                     |                            |
//!    |                     | reasons(metrics, is_bot)   |
//!    |                     | percentage(probability)    |
//!    |<-- verdict card ----|                            |
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use botscope::{confidence, reasoning, AccountMetrics, RawConfidence};
//!
//! let metrics = AccountMetrics {
//!     friends_count: 2000,
//!     followers_count: 100,
//!     ..AccountMetrics::new("suspicious")
//! };
//!
//! let reasons = reasoning::reasons(&metrics, true);
//! assert_eq!(reasons.len(), 1);
//!
//! let pct = confidence::percentage(&RawConfidence::Probabilities(vec![0.3, 0.95, 0.1]));
//! assert_eq!(pct, 86);
//! assert_eq!(confidence::label(pct).as_str(), "High");
//! ```
//!
//! ## Modules
//!
//! - [`account`]: Account metrics and form field help
//! - [`reasoning`]: Heuristic explanation rules
//! - [`confidence`]: Percentage and label scaling
//! - [`prediction`]: Classifier response and merged result
//! - [`client`]: HTTP client for the classifier
//! - [`dashboard`]: Dashboard state and bounded history
//! - [`server`]: HTTP dashboard API (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod account;
pub mod client;
pub mod confidence;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod prediction;
pub mod reasoning;
pub mod server;

// Re-exports for convenience
pub use account::AccountMetrics;
pub use client::ClassifierClient;
pub use confidence::{ConfidenceLabel, RawConfidence};
pub use config::Config;
pub use dashboard::{DashboardState, Event, History};
pub use error::{BotScopeError, Result};
pub use prediction::{ClassifierResponse, PredictionResult};
pub use reasoning::Signal;
pub use server::{AppState, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
