use std::fmt;

use serde::{Deserialize, Serialize};

use crate::beats::Beat;
use crate::transitions::{Transition, TransitionType};

/// How close a transition sits to its nearest qualifying beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CorrelationQuality {
    /// Band a beat distance using upper bounds for excellent, good and fair
    pub fn from_distance(distance: f64, bands: &[f64; 3]) -> Self {
        let [excellent, good, fair] = *bands;
        if distance < excellent {
            CorrelationQuality::Excellent
        } else if distance < good {
            CorrelationQuality::Good
        } else if distance < fair {
            CorrelationQuality::Fair
        } else {
            CorrelationQuality::Poor
        }
    }

    /// Excellent and good matches count as in sync
    pub fn is_synced(&self) -> bool {
        matches!(self, CorrelationQuality::Excellent | CorrelationQuality::Good)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationQuality::Excellent => "excellent",
            CorrelationQuality::Good => "good",
            CorrelationQuality::Fair => "fair",
            CorrelationQuality::Poor => "poor",
        }
    }
}

impl fmt::Display for CorrelationQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition matched against the nearest qualifying beat
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub transition: Transition,

    /// Nearest beat inside the search window, if any
    pub beat: Option<Beat>,

    /// Absolute distance to `beat` in seconds; infinite when unmatched
    pub distance: f64,

    /// Whether the match came from the strong-beat list
    pub is_strong: bool,

    pub quality: CorrelationQuality,

    pub needs_adjustment: bool,
}

/// A proposed retiming of a transition onto a strong beat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub original_timestamp: f64,
    pub suggested_timestamp: f64,
    pub beat_type: String,
    pub confidence: f64,
    pub transition_type: TransitionType,
}

/// Aggregate view of a correlation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSummary {
    pub total: usize,
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,

    /// Matches that came from the strong-beat list
    pub strong_matches: usize,

    pub needs_adjustment: usize,

    /// Share of transitions with excellent or good quality
    pub sync_ratio: f64,
}
