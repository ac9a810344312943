//! End-to-end tests against a fake classifier.
//!
//! A small Axum app stands in for the remote classifier on an ephemeral
//! port. The real client and the dashboard router talk to it over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use botscope::{
    client::ClassifierClient,
    config::ClassifierConfig,
    dashboard::HISTORY_LIMIT,
    reasoning::Signal,
    server::{create_router, AppState, ServerConfig},
    AccountMetrics, BotScopeError,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Predict handler that behaves like the real service for well-formed input
async fn fake_predict(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let Some(account) = body.get("account_data") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No account data provided"})),
        );
    };

    match account["id"].as_str() {
        Some("broken") => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "could not convert string to float"})),
            )
        },
        Some("silent") => return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        Some("scalar") => {
            return (
                StatusCode::OK,
                Json(json!({"account_id": "scalar", "is_bot": false, "confidence": 0.5})),
            )
        },
        Some("zero") => {
            return (
                StatusCode::OK,
                Json(json!({"account_id": "zero", "is_bot": true, "confidence": 0.0})),
            )
        },
        Some("slow") => tokio::time::sleep(Duration::from_millis(500)).await,
        _ => {},
    }

    let is_bot = account["friends_count"].as_u64().unwrap_or(0) > 1000;
    let probability = if is_bot { [0.05, 0.95] } else { [0.8, 0.2] };

    (
        StatusCode::OK,
        Json(json!({
            "account_id": account.get("id").cloned().unwrap_or(json!("Unknown")),
            "is_bot": is_bot,
            "confidence": probability.iter().copied().fold(0.0, f64::max),
            "probability": probability,
        })),
    )
}

fn fake_classifier() -> Router {
    Router::new()
        .route("/api/predict", post(fake_predict))
        .route(
            "/api/health",
            get(|| async { Json(json!({"status": "healthy"})) }),
        )
        .route(
            "/api/train",
            post(|| async {
                Json(json!({"success": true, "message": "Model trained successfully"}))
            }),
        )
}

/// Start the fake classifier and return its base URL
async fn start_classifier() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, fake_classifier()).await;
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{addr}")
}

fn client_for(url: &str) -> ClassifierClient {
    ClassifierClient::new(&ClassifierConfig {
        url: url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn state_for(url: &str) -> Arc<AppState> {
    Arc::new(AppState::new(
        ServerConfig::default().without_logging(),
        client_for(url),
    ))
}

fn dashboard_for(url: &str) -> Router {
    create_router(state_for(url))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        },
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_client_predict() {
    let url = start_classifier().await;
    let client = client_for(&url);

    let metrics = AccountMetrics {
        friends_count: 2000,
        followers_count: 100,
        ..AccountMetrics::new("follow_farm")
    };
    let response = client.predict(&metrics).await.unwrap();

    assert!(response.is_bot);
    assert_eq!(response.account_id, "follow_farm");
    assert_eq!(response.probability, Some(vec![0.05, 0.95]));
}

#[tokio::test]
async fn test_client_service_error_verbatim() {
    let url = start_classifier().await;
    let client = client_for(&url);

    let err = client
        .predict(&AccountMetrics::new("broken"))
        .await
        .unwrap_err();
    assert!(matches!(err, BotScopeError::Service(_)));
    assert_eq!(err.banner(), "could not convert string to float");

    let err = client
        .predict(&AccountMetrics::new("silent"))
        .await
        .unwrap_err();
    assert_eq!(err.banner(), "Failed to get prediction");
}

#[tokio::test]
async fn test_client_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    let err = client.predict(&AccountMetrics::new("x")).await.unwrap_err();

    assert!(matches!(err, BotScopeError::Network(_)));
    assert!(err.banner().starts_with("Error: "));
}

#[tokio::test]
async fn test_client_health_and_train() {
    let url = start_classifier().await;
    let client = client_for(&url);

    assert_eq!(client.health().await.unwrap().status, "healthy");

    let outcome = client.train().await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.message, "Model trained successfully");
}

#[tokio::test]
async fn test_dashboard_predict_flow() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    let (status, form) = send(
        &app,
        "PUT",
        "/form",
        Some(json!({"field": "id", "value": "new_account"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["id"], "new_account");

    send(
        &app,
        "PUT",
        "/form",
        Some(json!({"field": "friends_count", "value": "150"})),
    )
    .await;

    let (status, result) = send(&app, "POST", "/predict", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["account_id"], "new_account");
    assert_eq!(result["is_bot"], false);
    // max([0.8, 0.2]) * 90 = 72
    assert_eq!(result["confidence_percentage"], 72);
    assert_eq!(result["confidence_label"], "Moderate");
    assert_eq!(result["reasons"][0], Signal::AsymmetricFollow.message());

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["loading"], false);
    assert_eq!(state["result"]["account_id"], "new_account");
    assert_eq!(state["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_scalar_confidence() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    let (status, result) = send(&app, "POST", "/predict", Some(json!({"id": "scalar"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["confidence_percentage"], 45);
    assert_eq!(result["confidence_label"], "Very Low");
    assert_eq!(result["reasons"][0], Signal::HumanPattern.message());
}

#[tokio::test]
async fn test_dashboard_zero_confidence_uses_default() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    let (status, result) = send(&app, "POST", "/predict", Some(json!({"id": "zero"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["confidence_percentage"], 50);
    assert_eq!(result["confidence_label"], "Low");
}

#[tokio::test]
async fn test_dashboard_rejects_malformed_predict_body() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    send(
        &app,
        "PUT",
        "/form",
        Some(json!({"field": "id", "value": "stored"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/predict",
        Some(json!({"id": "new", "followers_count": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Error: "));

    // Nothing was submitted and the stored form is untouched
    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["form"]["id"], "stored");
    assert_eq!(state["loading"], false);
    assert!(state["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_submission_does_not_stay_busy() {
    let url = start_classifier().await;
    let state = state_for(&url);

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        state.submit(Some(AccountMetrics::new("slow"))),
    )
    .await;
    assert!(abandoned.is_err());

    // The request keeps going in the background and records its outcome
    for _ in 0..50 {
        if !state.snapshot().await.loading {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let snapshot = state.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.history.latest().unwrap().account_id, "slow");

    let result = state.submit(Some(AccountMetrics::new("next"))).await.unwrap();
    assert_eq!(result.account_id, "next");
    assert_eq!(state.snapshot().await.history.len(), 2);
}

#[tokio::test]
async fn test_dashboard_failure_keeps_history() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    let (status, _) = send(&app, "POST", "/predict", Some(json!({"id": "fine"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/predict", Some(json!({"id": "broken"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "could not convert string to float");

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["error"], "could not convert string to float");
    assert_eq!(state["loading"], false);
    assert_eq!(state["result"]["account_id"], "fine");
    assert_eq!(state["history"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", "/error", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, state) = send(&app, "GET", "/state", None).await;
    assert!(state["error"].is_null());
}

#[tokio::test]
async fn test_dashboard_history_bounded() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    for i in 0..12 {
        let (status, _) = send(
            &app,
            "POST",
            "/predict",
            Some(json!({"id": format!("acct{i}")})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, history) = send(&app, "GET", "/history", None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0]["account_id"], "acct11");
    assert_eq!(history[9]["account_id"], "acct2");

    let (status, _) = send(&app, "DELETE", "/history", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, history) = send(&app, "GET", "/history", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_form_and_tooltip_errors() {
    let url = start_classifier().await;
    let app = dashboard_for(&url);

    let (status, body) = send(
        &app,
        "PUT",
        "/form",
        Some(json!({"field": "followers_count", "value": "lots"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("followers_count"));

    let (status, body) = send(&app, "POST", "/tooltip", Some(json!({"field": "verified"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["description"],
        "Whether the account has been verified by the platform"
    );

    let (status, _) = send(&app, "POST", "/tooltip", Some(json!({"field": "karma"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["tooltip"], "verified");

    let (status, _) = send(&app, "DELETE", "/tooltip", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, state) = send(&app, "GET", "/state", None).await;
    assert!(state["tooltip"].is_null());
}

#[tokio::test]
async fn test_dashboard_explain_and_fields() {
    let app = dashboard_for("http://127.0.0.1:9");

    let (status, body) = send(
        &app,
        "POST",
        "/explain",
        Some(json!({
            "metrics": {"default_profile": true, "default_profile_image": true, "verified": true},
            "is_bot": true,
            "confidence": 0.95
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signals"], json!(["default_appearance", "verified"]));
    assert_eq!(body["reasons"][1], Signal::Verified.message());
    // 0.95 * 80 = 76
    assert_eq!(body["confidence_label"], "High");

    let (status, fields) = send(&app, "GET", "/fields", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fields.as_array().unwrap().len(), 12);
    assert_eq!(fields[0]["name"], "id");

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["status"], "ok");

    let (_, status_body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status_body["classifier_url"], "http://127.0.0.1:9");
    assert_eq!(status_body["history_len"], 0);
}
