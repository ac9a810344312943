//! Dashboard state: form, tooltip, latest verdict, error banner and history.
//!
//! # Example
//!
//! ```rust
//! use botscope::dashboard::{DashboardState, Event};
//!
//! let state = DashboardState::new()
//!     .apply(Event::FieldChanged {
//!         field: "friends_count".to_string(),
//!         value: "150".to_string(),
//!     })
//!     .unwrap();
//! assert_eq!(state.form.friends_count, 150);
//! ```

mod history;
mod state;

pub use history::{History, HISTORY_LIMIT};
pub use state::{DashboardState, Event};
