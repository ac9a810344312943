//! Display confidence for a classifier verdict.
//!
//! The classifier returns class probabilities (or a single confidence) in
//! `0.0..=1.0`. The dashboard shows an integer percentage and a coarse label.
//! Percentages are scaled by [`PRIMARY_SCALE`] rather than 100, so a fully
//! certain model still reads as 90%.
//!
//! Labels computed straight from a fractional confidence use
//! [`LABEL_FALLBACK_SCALE`] instead. The two factors are kept separate on
//! purpose; see `DESIGN.md`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scale applied to raw probabilities for the displayed percentage
pub const PRIMARY_SCALE: f64 = 90.0;

/// Scale applied to a fractional confidence when only a label is wanted
pub const LABEL_FALLBACK_SCALE: f64 = 80.0;

/// Percentage shown when the service gave nothing usable
pub const DEFAULT_PERCENTAGE: u8 = 50;

/// Confidence data as returned by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum RawConfidence {
    /// Per-class probabilities
    Probabilities(Vec<f64>),
    /// Single confidence value
    Scalar(f64),
    /// Nothing usable
    Missing,
}

impl RawConfidence {
    /// Pick the raw value from a service response.
    ///
    /// A non-empty probability array wins over the scalar. An empty array is
    /// ignored, and a scalar of exactly zero counts as absent.
    pub fn from_parts(probability: Option<&[f64]>, confidence: Option<f64>) -> Self {
        match (probability, confidence) {
            (Some(probs), _) if !probs.is_empty() => RawConfidence::Probabilities(probs.to_vec()),
            (_, Some(value)) if value != 0.0 => RawConfidence::Scalar(value),
            _ => RawConfidence::Missing,
        }
    }

    fn top(&self) -> Option<f64> {
        let value = match self {
            RawConfidence::Probabilities(probs) => {
                probs.iter().copied().filter(|p| !p.is_nan()).reduce(f64::max)?
            },
            RawConfidence::Scalar(value) => *value,
            RawConfidence::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Display percentage in `0..=100`.
///
/// Takes the largest probability (or the scalar), scales it by
/// [`PRIMARY_SCALE`] and rounds. Missing or non-finite input gives
/// [`DEFAULT_PERCENTAGE`].
pub fn percentage(raw: &RawConfidence) -> u8 {
    match raw.top() {
        Some(value) => scale(value, PRIMARY_SCALE),
        None => DEFAULT_PERCENTAGE,
    }
}

fn scale(value: f64, factor: f64) -> u8 {
    (value * factor).round().clamp(0.0, 100.0) as u8
}

/// Coarse confidence wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    /// Below 50
    #[serde(rename = "Very Low")]
    VeryLow,
    /// 50 to 59
    Low,
    /// 60 to 74
    Moderate,
    /// 75 to 89
    High,
    /// 90 and above
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ConfidenceLabel {
    /// Label text
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLabel::VeryHigh => "Very High",
            ConfidenceLabel::High => "High",
            ConfidenceLabel::Moderate => "Moderate",
            ConfidenceLabel::Low => "Low",
            ConfidenceLabel::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a display percentage.
pub fn label(percentage: u8) -> ConfidenceLabel {
    label_for_score(f64::from(percentage))
}

/// Label for a fractional confidence (`0.0..=1.0`), scaled by
/// [`LABEL_FALLBACK_SCALE`].
pub fn label_for_fraction(confidence: f64) -> ConfidenceLabel {
    label_for_score(confidence * LABEL_FALLBACK_SCALE)
}

fn label_for_score(score: f64) -> ConfidenceLabel {
    if score >= 90.0 {
        ConfidenceLabel::VeryHigh
    } else if score >= 75.0 {
        ConfidenceLabel::High
    } else if score >= 60.0 {
        ConfidenceLabel::Moderate
    } else if score >= 50.0 {
        ConfidenceLabel::Low
    } else {
        ConfidenceLabel::VeryLow
    }
}
