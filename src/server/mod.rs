//! Dashboard HTTP server.
//!
//! Serves the dashboard as a JSON API that a browser front end (or `curl`)
//! can drive:
//!
//! | Endpoint   | Method      | Description                              |
//! |------------|-------------|------------------------------------------|
//! | `/health`  | GET         | Health check                             |
//! | `/status`  | GET         | Uptime, classifier URL, loading flag     |
//! | `/fields`  | GET         | Form fields with help text               |
//! | `/state`   | GET         | Whole dashboard state                    |
//! | `/form`    | PUT / POST  | Edit one field / replace the form        |
//! | `/tooltip` | POST / DEL  | Show / hide field help                   |
//! | `/error`   | DELETE      | Dismiss the error banner                 |
//! | `/predict` | POST        | Submit the form to the classifier        |
//! | `/explain` | POST        | Reasoning only, no classifier call       |
//! | `/history` | GET / DEL   | Recent verdicts / clear them             |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use botscope::{client::ClassifierClient, server::{AppState, ServerConfig}};
//!
//! let classifier = ClassifierClient::new(&Default::default())?;
//! let state = Arc::new(AppState::new(ServerConfig::default(), classifier));
//! botscope::server::serve(state).await?;
//! ```

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check, ApiError};
pub use state::AppState;

use crate::error::{BotScopeError, Result};

/// Bind the configured address and serve until the process stops.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.addr;
    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| BotScopeError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| BotScopeError::Server(format!("Server error: {}", e)))
}
