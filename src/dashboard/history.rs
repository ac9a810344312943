//! Bounded, newest-first prediction history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::prediction::PredictionResult;

/// Most results kept
pub const HISTORY_LIMIT: usize = 10;

/// Recent predictions, newest at index 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<PredictionResult>,
}

impl History {
    /// Create empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result at the front, dropping the oldest past [`HISTORY_LIMIT`].
    pub fn pushed(mut self, result: PredictionResult) -> Self {
        self.entries.push_front(result);
        self.entries.truncate(HISTORY_LIMIT);
        self
    }

    /// Newest result
    pub fn latest(&self) -> Option<&PredictionResult> {
        self.entries.front()
    }

    /// Result at `index` (0 = newest)
    pub fn get(&self, index: usize) -> Option<&PredictionResult> {
        self.entries.get(index)
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &PredictionResult> {
        self.entries.iter()
    }

    /// Number of results kept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been kept yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountMetrics;
    use crate::prediction::ClassifierResponse;

    fn result(id: &str) -> PredictionResult {
        PredictionResult::assemble(
            ClassifierResponse {
                is_bot: false,
                account_id: id.to_string(),
                probability: None,
                confidence: Some(0.8),
            },
            AccountMetrics::new(id),
        )
    }

    #[test]
    fn test_newest_first() {
        let history = History::new().pushed(result("a")).pushed(result("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().account_id, "b");
        assert_eq!(history.get(1).unwrap().account_id, "a");
    }

    #[test]
    fn test_truncates_at_limit() {
        let mut history = History::new();
        for i in 0..15 {
            history = history.pushed(result(&format!("acct{i}")));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.latest().unwrap().account_id, "acct14");
        assert_eq!(history.get(9).unwrap().account_id, "acct5");
        assert!(history.get(10).is_none());
    }

    #[test]
    fn test_serializes_as_list() {
        let history = History::new().pushed(result("a"));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["account_id"], "a");
    }
}
