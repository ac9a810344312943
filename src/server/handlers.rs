//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use crate::account::{self, AccountMetrics};
use crate::confidence::{self, ConfidenceLabel};
use crate::dashboard::{DashboardState, Event, History};
use crate::error::BotScopeError;
use crate::prediction::PredictionResult;
use crate::reasoning::{self, Signal};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = state.config.cors_enabled;
    let logging = state.config.logging;

    let mut router = Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/status", get(status))
        // Form
        .route("/fields", get(list_fields))
        .route("/state", get(get_state))
        .route("/form", put(edit_field).post(replace_form))
        .route("/tooltip", post(show_tooltip).delete(hide_tooltip))
        .route("/error", delete(dismiss_error))
        // Verdicts
        .route("/predict", post(predict))
        .route("/explain", post(explain))
        .route("/history", get(get_history).delete(clear_history))
        .with_state(state);

    if cors {
        router = router.layer(CorsLayer::permissive());
    }
    if logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Error reply: `{"error": <banner>}` with a status matching the failure.
pub struct ApiError(BotScopeError);

impl From<BotScopeError> for ApiError {
    fn from(err: BotScopeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BotScopeError::InvalidField { .. } | BotScopeError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            },
            BotScopeError::Busy => StatusCode::CONFLICT,
            BotScopeError::Network(_) | BotScopeError::Service(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({"error": self.0.banner()})),
        )
            .into_response()
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the server runs
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status response
#[derive(Serialize)]
pub struct StatusResponse {
    /// Always `ok` while the server runs
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Seconds since start
    pub uptime_secs: u64,
    /// Base URL of the classifier service
    pub classifier_url: String,
    /// Whether a submission is in flight
    pub loading: bool,
    /// Number of verdicts kept
    pub history_len: usize,
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.snapshot().await;

    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime().as_secs(),
        classifier_url: state.classifier.base_url().to_string(),
        loading: dashboard.loading,
        history_len: dashboard.history.len(),
    })
}

/// One form field and its help text
#[derive(Serialize)]
pub struct FieldInfo {
    /// Field name as sent to the classifier
    pub name: &'static str,
    /// Help text
    pub description: &'static str,
}

/// List form fields
async fn list_fields() -> impl IntoResponse {
    Json(
        account::field_help()
            .map(|(name, description)| FieldInfo { name, description })
            .collect::<Vec<_>>(),
    )
}

/// Full dashboard state
async fn get_state(State(state): State<Arc<AppState>>) -> Json<DashboardState> {
    Json(state.snapshot().await)
}

/// Field edit request
#[derive(Deserialize)]
pub struct FieldEdit {
    /// Field to change
    pub field: String,
    /// Raw input text; blank clears the field
    #[serde(default)]
    pub value: String,
}

/// Edit one form field
async fn edit_field(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FieldEdit>,
) -> Result<Json<AccountMetrics>, ApiError> {
    let next = state
        .apply(Event::FieldChanged {
            field: req.field,
            value: req.value,
        })
        .await?;
    Ok(Json(next.form))
}

/// Replace the whole form
async fn replace_form(
    State(state): State<Arc<AppState>>,
    Json(metrics): Json<AccountMetrics>,
) -> Result<Json<AccountMetrics>, ApiError> {
    let next = state.apply(Event::FormReplaced(metrics)).await?;
    Ok(Json(next.form))
}

/// Tooltip request
#[derive(Deserialize)]
pub struct TooltipRequest {
    /// Field whose help text to show
    pub field: String,
}

/// Tooltip response
#[derive(Serialize)]
pub struct TooltipResponse {
    /// Field shown
    pub field: String,
    /// Its help text
    pub description: &'static str,
}

/// Show help text for a field
async fn show_tooltip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TooltipRequest>,
) -> Response {
    match state.apply(Event::TooltipShown(req.field.clone())).await {
        Ok(next) => Json(TooltipResponse {
            field: req.field,
            description: next.tooltip_text().unwrap_or_default(),
        })
        .into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": e.banner()})),
        )
            .into_response(),
    }
}

/// Hide help text
async fn hide_tooltip(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.apply(Event::TooltipHidden).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Close the error banner
async fn dismiss_error(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.apply(Event::ErrorDismissed).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Submit the form to the classifier.
///
/// A JSON body replaces the form first; a request without one submits the
/// stored form. A body that does not decode is rejected before anything is
/// sent.
async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AccountMetrics>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let metrics = match body {
        Ok(Json(metrics)) => Some(metrics),
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            return Err(BotScopeError::InvalidRequest(rejection.body_text()).into());
        },
    };

    let result = state.submit(metrics).await?;
    Ok(Json(result))
}

/// Explain request
#[derive(Deserialize)]
pub struct ExplainRequest {
    /// Metrics to evaluate
    #[serde(default)]
    pub metrics: AccountMetrics,
    /// Verdict used to pick the fallback line
    #[serde(default)]
    pub is_bot: bool,
    /// Fractional confidence (0-1) to label, if known
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Explain response
#[derive(Serialize)]
pub struct ExplainResponse {
    /// Rules that fired, in display order
    pub signals: Vec<Signal>,
    /// Their human-readable lines
    pub reasons: Vec<&'static str>,
    /// Label for the given confidence, if one was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_label: Option<ConfidenceLabel>,
}

/// Reasoning for metrics without calling the classifier
async fn explain(Json(req): Json<ExplainRequest>) -> impl IntoResponse {
    let signals = reasoning::signals(&req.metrics, req.is_bot);

    Json(ExplainResponse {
        reasons: signals.iter().map(|s| s.message()).collect(),
        signals,
        confidence_label: req.confidence.map(confidence::label_for_fraction),
    })
}

/// Recent verdicts, newest first
async fn get_history(State(state): State<Arc<AppState>>) -> Json<History> {
    Json(state.snapshot().await.history)
}

/// Clear history
async fn clear_history(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.apply(Event::HistoryCleared).await?;
    Ok(StatusCode::NO_CONTENT)
}
