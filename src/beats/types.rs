use std::path::Path;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BeatError, Result};

/// Label used for beats without a specific type
pub const REGULAR_BEAT: &str = "regular";

/// An audio beat event supplied by an external beat tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Time of the beat in seconds
    pub timestamp: f64,

    /// Free-form label such as "bass_drop", "buildup" or "regular"
    #[serde(rename = "type", default = "regular_label")]
    pub kind: String,

    /// Tracker confidence (0.0-1.0), when the tracker reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

fn regular_label() -> String {
    REGULAR_BEAT.to_string()
}

impl Beat {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            kind: regular_label(),
            confidence: None,
        }
    }

    pub fn with_kind<S: Into<String>>(mut self, kind: S) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether the beat carries a specific (non-generic) label
    pub fn is_labeled(&self) -> bool {
        !self.kind.is_empty() && self.kind != REGULAR_BEAT
    }
}

/// Beat tracker output: all beats plus the strong (hook/drop) subset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatSet {
    #[serde(default, deserialize_with = "list_or_empty")]
    pub beats: Vec<Beat>,

    #[serde(default, deserialize_with = "list_or_empty")]
    pub strong_beats: Vec<Beat>,

    /// Audio duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Estimated tempo in BPM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
}

impl BeatSet {
    pub fn new(beats: Vec<Beat>, strong_beats: Vec<Beat>) -> Self {
        Self {
            beats,
            strong_beats,
            duration: None,
            tempo: None,
        }
    }

    /// Parse a beat set from JSON
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a beat set from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| BeatError::FileNotFound { path: path.display().to_string() })?;

        let set = Self::from_json_str(&content).map_err(|e| BeatError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(set)
    }

    /// True when neither list has any beats
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty() && self.strong_beats.is_empty()
    }
}

/// Deserialize a list, treating any non-array value as empty
pub(crate) fn list_or_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_backend_shape() {
        let json = r#"{
            "beats": [{"timestamp": 0.5}, {"timestamp": 1.0}],
            "strongBeats": [{"timestamp": 1.0, "type": "hook"}],
            "duration": 12.5,
            "tempo": 120
        }"#;

        let set = BeatSet::from_json_str(json).unwrap();
        assert_eq!(set.beats.len(), 2);
        assert_eq!(set.beats[0].kind, "regular");
        assert!(set.beats[0].confidence.is_none());
        assert_eq!(set.strong_beats[0].kind, "hook");
        assert!(set.strong_beats[0].is_labeled());
        assert_eq!(set.duration, Some(12.5));
        assert_eq!(set.tempo, Some(120.0));
    }

    #[test]
    fn test_non_array_lists_are_empty() {
        let set = BeatSet::from_json_str(r#"{"beats": null, "strongBeats": {"oops": 1}}"#).unwrap();
        assert!(set.is_empty());

        let set = BeatSet::from_json_str("{}").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_file_loading_errors() {
        assert!(matches!(
            BeatSet::from_json_file("/definitely/not/here.json"),
            Err(crate::error::CutsyncError::Beat(BeatError::FileNotFound { .. }))
        ));

        let dir = tempdir().unwrap();
        let path = dir.path().join("beats.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            BeatSet::from_json_file(&path),
            Err(crate::error::CutsyncError::Beat(BeatError::ParseFailed { .. }))
        ));
    }
}
