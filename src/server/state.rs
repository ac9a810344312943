//! Server state: the dashboard record and the classifier client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::config::ServerConfig;
use crate::account::AccountMetrics;
use crate::client::ClassifierClient;
use crate::dashboard::{DashboardState, Event};
use crate::error::{BotScopeError, Result};
use crate::prediction::PredictionResult;

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Classifier client
    pub classifier: ClassifierClient,
    /// The dashboard record
    dashboard: Arc<Mutex<DashboardState>>,
    /// Server start time
    start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig, classifier: ClassifierClient) -> Self {
        Self {
            config,
            classifier,
            dashboard: Arc::new(Mutex::new(DashboardState::new())),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Copy of the current dashboard record
    pub async fn snapshot(&self) -> DashboardState {
        self.dashboard.lock().await.clone()
    }

    /// Apply one event and store the resulting state.
    pub async fn apply(&self, event: Event) -> Result<DashboardState> {
        let mut dashboard = self.dashboard.lock().await;
        let next = dashboard.apply(event)?;
        *dashboard = next.clone();
        Ok(next)
    }

    /// Submit the form (optionally replacing it first) to the classifier.
    ///
    /// The record is marked loading before the request goes out and the lock
    /// is released while it is in flight, so a concurrent submission sees
    /// [`BotScopeError::Busy`]. The request and the final transition run on
    /// their own task, so the record leaves loading even when the caller
    /// stops waiting.
    pub async fn submit(&self, metrics: Option<AccountMetrics>) -> Result<PredictionResult> {
        let form = {
            let mut dashboard = self.dashboard.lock().await;
            let mut next = dashboard.clone();
            if let Some(metrics) = metrics {
                next = next.apply(Event::FormReplaced(metrics))?;
            }
            next = next.apply(Event::Submitted)?;
            let form = next.form.clone();
            *dashboard = next;
            form
        };

        tracing::info!(account = %form.id, "Submitting account to classifier");

        let classifier = self.classifier.clone();
        let dashboard = Arc::clone(&self.dashboard);
        let task = tokio::spawn(classify(classifier, dashboard, form));

        task.await
            .map_err(|e| BotScopeError::Server(format!("Prediction task failed: {e}")))?
    }
}

/// Send `form` to the classifier and record the outcome on `dashboard`.
async fn classify(
    classifier: ClassifierClient,
    dashboard: Arc<Mutex<DashboardState>>,
    form: AccountMetrics,
) -> Result<PredictionResult> {
    let outcome = classifier.predict(&form).await;
    let mut dashboard = dashboard.lock().await;

    match outcome {
        Ok(response) => {
            let result = PredictionResult::assemble(response, form);
            tracing::info!(
                account = %result.account_id,
                verdict = result.verdict(),
                confidence = result.confidence_percentage,
                "Prediction complete"
            );
            let next = dashboard.apply(Event::Succeeded(result.clone()))?;
            *dashboard = next;
            Ok(result)
        },
        Err(e) => {
            tracing::warn!(account = %form.id, error = %e, "Prediction failed");
            let next = dashboard.apply(Event::Failed(e.banner()))?;
            *dashboard = next;
            Err(e)
        },
    }
}
