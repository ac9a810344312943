//! Classifier responses and the results shown on the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::account::AccountMetrics;
use crate::confidence::{self, ConfidenceLabel, RawConfidence};
use crate::reasoning;

/// Account id the service reports when the payload had none
pub const UNKNOWN_ACCOUNT: &str = "Unknown";

/// Successful `/api/predict` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    /// Service verdict
    pub is_bot: bool,
    /// Echoed account id
    #[serde(default = "unknown_account", deserialize_with = "account_id_from_value")]
    pub account_id: String,
    /// Per-class probabilities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Vec<f64>>,
    /// Top-class confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ClassifierResponse {
    /// Raw confidence data carried by this response
    pub fn raw_confidence(&self) -> RawConfidence {
        RawConfidence::from_parts(self.probability.as_deref(), self.confidence)
    }
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceError {
    /// Message to show the operator
    #[serde(default)]
    pub error: Option<String>,
}

fn unknown_account() -> String {
    UNKNOWN_ACCOUNT.to_string()
}

// The service echoes whatever id it was given, which may be numeric.
fn account_id_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => unknown_account(),
        other => other.to_string(),
    })
}

/// A verdict merged with the locally computed explanation and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Account the verdict is for
    pub account_id: String,
    /// Service verdict
    pub is_bot: bool,
    /// Raw probabilities as returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Vec<f64>>,
    /// Raw confidence as returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Display percentage (0-100)
    pub confidence_percentage: u8,
    /// Display label for `confidence_percentage`
    pub confidence_label: ConfidenceLabel,
    /// Explanation lines, never empty
    pub reasons: Vec<String>,
    /// Metrics that were submitted
    pub metrics: AccountMetrics,
    /// When the verdict came back
    pub submitted_at: DateTime<Utc>,
}

impl PredictionResult {
    /// Merge a service response with the metrics that produced it.
    pub fn assemble(response: ClassifierResponse, metrics: AccountMetrics) -> Self {
        let confidence_percentage = confidence::percentage(&response.raw_confidence());
        let reasons = reasoning::reasons(&metrics, response.is_bot);

        Self {
            account_id: response.account_id,
            is_bot: response.is_bot,
            probability: response.probability,
            confidence: response.confidence,
            confidence_percentage,
            confidence_label: confidence::label(confidence_percentage),
            reasons,
            metrics,
            submitted_at: Utc::now(),
        }
    }

    /// "Bot" or "Human"
    pub fn verdict(&self) -> &'static str {
        if self.is_bot {
            "Bot"
        } else {
            "Human"
        }
    }
}
