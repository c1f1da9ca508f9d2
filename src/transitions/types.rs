use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a detected transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    /// Abrupt change of palette and composition
    Cut,

    /// Large brightness swing
    Fade,

    /// Brightness and color blend together
    Dissolve,

    /// Directional reveal of new content
    Wipe,

    /// Scale change
    Zoom,

    /// Lateral camera movement
    Pan,
}

impl TransitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::Cut => "cut",
            TransitionType::Fade => "fade",
            TransitionType::Dissolve => "dissolve",
            TransitionType::Wipe => "wipe",
            TransitionType::Zoom => "zoom",
            TransitionType::Pan => "pan",
        }
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected scene change between two sampled frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Timestamp of the later frame of the compared pair (seconds)
    pub timestamp: f64,

    #[serde(rename = "type")]
    pub kind: TransitionType,

    /// Classification confidence (0.0-0.98)
    pub confidence: f64,

    /// Human-readable rationale for the visual classification
    pub visual_cue: String,

    /// Descriptive audio hint for the transition type
    pub audio_cue: String,

    /// Raw weighted difference score that triggered detection
    #[serde(rename = "detectionScore", default)]
    pub detection_score: f64,
}

impl Transition {
    /// Create a transition with the stock cue text for its type
    pub fn new(timestamp: f64, kind: TransitionType, confidence: f64) -> Self {
        let (visual_cue, audio_cue) = cues_for(kind);
        Self {
            timestamp,
            kind,
            confidence,
            visual_cue: visual_cue.to_string(),
            audio_cue: audio_cue.to_string(),
            detection_score: 0.0,
        }
    }
}

/// Ordering used for every transition list: ascending time, then
/// descending confidence
pub fn timeline_order(a: &Transition, b: &Transition) -> Ordering {
    a.timestamp
        .total_cmp(&b.timestamp)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
}

/// Stock visual and audio cue text for a transition type
pub fn cues_for(kind: TransitionType) -> (&'static str, &'static str) {
    match kind {
        TransitionType::Fade => (
            "Significant brightness shift from dark to light or vice versa, suggesting fade transition",
            "Audio gradually fades in/out during scene change",
        ),
        TransitionType::Cut => (
            "Abrupt change in color palette and composition indicating hard cut between scenes",
            "Sharp audio discontinuity with immediate change in ambient sound",
        ),
        TransitionType::Dissolve => (
            "Gradual blending of frames showing smooth transition between scenes",
            "Cross-fading audio with overlapping sound from both scenes",
        ),
        TransitionType::Wipe => (
            "Directional transition revealing new scene content",
            "Continuous audio track maintaining spatial awareness through transition",
        ),
        TransitionType::Pan => (
            "Camera movement tracking motion across the frame",
            "Continuous audio track maintaining spatial awareness through transition",
        ),
        TransitionType::Zoom => (
            "Scale change in frame content suggesting zoom transition",
            "Audio perspective shift matching visual transition dynamics",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_serializes_lowercase() {
        let transition = Transition::new(1.25, TransitionType::Dissolve, 0.8);
        let json = serde_json::to_string(&transition).unwrap();

        assert!(json.contains("\"type\":\"dissolve\""));
        assert!(json.contains("\"detectionScore\":0.0"));

        let back: Transition = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, TransitionType::Dissolve);
    }

    #[test]
    fn test_timeline_order_breaks_ties_by_confidence() {
        let mut list = vec![
            Transition::new(2.0, TransitionType::Cut, 0.5),
            Transition::new(1.0, TransitionType::Fade, 0.7),
            Transition::new(2.0, TransitionType::Wipe, 0.9),
        ];
        list.sort_by(timeline_order);

        assert_eq!(list[0].timestamp, 1.0);
        assert_eq!(list[1].kind, TransitionType::Wipe);
        assert_eq!(list[2].kind, TransitionType::Cut);
    }
}
