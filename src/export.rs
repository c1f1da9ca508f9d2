//! Report and spreadsheet output for analysis results.

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::correlation::{Correlation, CorrelationSummary, Suggestion};
use crate::error::Result;
use crate::transitions::Transition;

/// Header row of the transitions CSV
pub const CSV_HEADER: &str = "Timestamp,Type,Confidence,Visual Cue,Audio Cue";

/// Everything one analysis run produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// RFC 3339 time the report was assembled
    pub generated_at: String,
    pub duration: f64,
    pub frame_count: usize,
    pub transitions: Vec<Transition>,
    pub correlations: Vec<Correlation>,
    pub suggestions: Vec<Suggestion>,
    pub summary: CorrelationSummary,
}

impl AnalysisReport {
    pub fn new(
        duration: f64,
        frame_count: usize,
        transitions: Vec<Transition>,
        correlations: Vec<Correlation>,
        suggestions: Vec<Suggestion>,
        summary: CorrelationSummary,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            duration,
            frame_count,
            transitions,
            correlations,
            suggestions,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Format seconds as `m:ss.cc`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00.00".to_string();
    }

    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u64;
    format!("{}:{:02}.{:02}", mins, secs, hundredths)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render transitions as CSV, one row per transition in time order
pub fn transitions_csv(transitions: &[Transition]) -> String {
    let mut sorted: Vec<&Transition> = transitions.iter().collect();
    sorted.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let mut lines = Vec::with_capacity(sorted.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for t in sorted {
        let confidence = format!("{}%", (t.confidence * 100.0).round() as i64);
        let row = [
            quote(&format_time(t.timestamp)),
            quote(t.kind.as_str()),
            quote(&confidence),
            quote(&t.visual_cue),
            quote(&t.audio_cue),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Read a transitions JSON file; anything other than an array yields no transitions
pub fn read_transitions<P: AsRef<Path>>(path: P) -> Result<Vec<Transition>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    if !value.is_array() {
        debug!("{:?} does not hold a transition list", path.as_ref());
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

/// Write any serializable value as pretty JSON
pub async fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path.as_ref(), json).await?;
    info!("Wrote {:?}", path.as_ref());
    Ok(())
}

/// Write the transitions CSV
pub async fn write_csv<P: AsRef<Path>>(path: P, transitions: &[Transition]) -> Result<()> {
    tokio::fs::write(path.as_ref(), transitions_csv(transitions)).await?;
    info!("Wrote {} transitions to {:?}", transitions.len(), path.as_ref());
    Ok(())
}
