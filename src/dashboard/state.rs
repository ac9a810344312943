//! Dashboard state and its transitions.
//!
//! The whole dashboard is one [`DashboardState`] value. Every change is an
//! [`Event`] applied with [`DashboardState::apply`], which returns the next
//! state and leaves the current one untouched.

use serde::{Deserialize, Serialize};

use super::history::History;
use crate::account::{self, AccountMetrics};
use crate::error::{BotScopeError, Result};
use crate::prediction::PredictionResult;

/// Something that happened on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// One form field was edited
    FieldChanged {
        /// Field name
        field: String,
        /// Raw input text
        value: String,
    },
    /// The whole form was replaced
    FormReplaced(AccountMetrics),
    /// Help text requested for a field
    TooltipShown(String),
    /// Help text dismissed
    TooltipHidden,
    /// The form was submitted to the classifier
    Submitted,
    /// The classifier answered
    Succeeded(PredictionResult),
    /// The submission failed; carries the banner text
    Failed(String),
    /// The error banner was closed
    ErrorDismissed,
    /// History was cleared
    HistoryCleared,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Current form contents
    pub form: AccountMetrics,
    /// Field whose help text is showing
    pub tooltip: Option<String>,
    /// Latest verdict
    pub result: Option<PredictionResult>,
    /// Error banner
    pub error: Option<String>,
    /// Waiting on the classifier
    pub loading: bool,
    /// Recent verdicts, newest first
    pub history: History,
}

impl DashboardState {
    /// Empty dashboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the state after `event`.
    ///
    /// Rejected events (unknown fields, bad values, a second submission while
    /// one is in flight) return an error and produce no new state.
    pub fn apply(&self, event: Event) -> Result<Self> {
        let mut next = self.clone();

        match event {
            Event::FieldChanged { field, value } => {
                next.form.set_field(&field, &value)?;
            },
            Event::FormReplaced(metrics) => {
                next.form = metrics;
            },
            Event::TooltipShown(field) => {
                if !account::is_known_field(&field) {
                    return Err(BotScopeError::invalid_field(field, "unknown field"));
                }
                next.tooltip = Some(field);
            },
            Event::TooltipHidden => {
                next.tooltip = None;
            },
            Event::Submitted => {
                if self.loading {
                    return Err(BotScopeError::Busy);
                }
                next.loading = true;
                next.error = None;
            },
            Event::Succeeded(result) => {
                next.history = next.history.pushed(result.clone());
                next.result = Some(result);
                next.loading = false;
            },
            Event::Failed(message) => {
                next.error = Some(message);
                next.loading = false;
            },
            Event::ErrorDismissed => {
                next.error = None;
            },
            Event::HistoryCleared => {
                next.history = History::new();
            },
        }

        Ok(next)
    }

    /// Help text for the field whose tooltip is showing
    pub fn tooltip_text(&self) -> Option<&'static str> {
        self.tooltip.as_deref().and_then(account::describe)
    }
}
