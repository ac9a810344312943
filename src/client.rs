//! HTTP client for the remote bot classifier.
//!
//! The classifier is an external service; this module only knows its wire
//! shape:
//!
//! | Endpoint        | Method | Body                          |
//! |-----------------|--------|-------------------------------|
//! | `/api/predict`  | POST   | `{"account_data": {...}}`     |
//! | `/api/health`   | GET    |                               |
//! | `/api/train`    | POST   |                               |
//!
//! Non-2xx replies carry `{"error": "..."}`, which is surfaced verbatim as
//! [`BotScopeError::Service`].

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::account::AccountMetrics;
use crate::config::ClassifierConfig;
use crate::error::{BotScopeError, Result};
use crate::prediction::{ClassifierResponse, ServiceError};

/// Shown when a failed reply carries no `error` message
pub const GENERIC_FAILURE: &str = "Failed to get prediction";

#[derive(Serialize)]
struct PredictRequest<'a> {
    account_data: &'a AccountMetrics,
}

/// `/api/health` reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// `healthy` when the service is up
    pub status: String,
}

/// `/api/train` reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainOutcome {
    /// Whether retraining finished
    #[serde(default)]
    pub success: bool,
    /// Service message
    #[serde(default)]
    pub message: String,
}

/// Classifier client
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: Client,
    base_url: String,
}

impl ClassifierClient {
    /// Create a client from configuration
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BotScopeError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests go to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the classifier for a verdict on `metrics`.
    pub async fn predict(&self, metrics: &AccountMetrics) -> Result<ClassifierResponse> {
        let url = self.endpoint("/api/predict");
        tracing::debug!(account = %metrics.id, %url, "Requesting prediction");

        let response = self
            .client
            .post(&url)
            .json(&PredictRequest {
                account_data: metrics,
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        let verdict: ClassifierResponse = response.json().await?;

        tracing::debug!(
            account = %verdict.account_id,
            is_bot = verdict.is_bot,
            "Prediction received"
        );
        Ok(verdict)
    }

    /// Check that the classifier is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.endpoint("/api/health")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Ask the classifier to retrain itself on its own data.
    pub async fn train(&self) -> Result<TrainOutcome> {
        let response = self.client.post(self.endpoint("/api/train")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

/// Turn a non-2xx reply into [`BotScopeError::Service`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceError>(&body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());

    tracing::warn!(%status, %message, "Classifier returned an error");
    Err(BotScopeError::Service(message))
}
