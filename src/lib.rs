//! # Cutsync
//!
//! Detect visual transitions in sampled video frames and line them up with
//! the beats of the soundtrack.
//!
//! This library reduces extracted frames to compact visual statistics,
//! finds and classifies scene changes between consecutive frames, and
//! correlates those changes with beats from an external beat tracker.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cutsync::{AnalysisPipeline, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let pipeline = AnalysisPipeline::new(Config::default());
//! let report = pipeline
//!     .run("frames/", Some("beats.json"), Some(30.0), Some(42))
//!     .await?;
//!
//! for correlation in &report.correlations {
//!     println!(
//!         "{:.2}s {} -> {}",
//!         correlation.transition.timestamp, correlation.transition.kind, correlation.quality
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`frames`] - Frame loading and per-frame statistics
//! - [`transitions`] - Transition detection, classification and timeline editing
//! - [`beats`] - Beat tracker input and strong-beat selection
//! - [`correlation`] - Beat matching, quality grading and retiming suggestions
//! - [`export`] - JSON reports and CSV output
//! - [`pipeline`] - End-to-end analysis
//! - [`config`] - Configuration management
//!
//! ## Working Without the Pipeline
//!
//! Each stage is usable on its own and is synchronous:
//!
//! ```rust
//! use cutsync::{BeatCorrelator, FrameStatsAnalyzer, TransitionDetector};
//! use cutsync::beats::Beat;
//!
//! let analyzer = FrameStatsAnalyzer::new();
//! let dark = vec![10u8; 4 * 4 * 4];
//! let bright = vec![240u8; 4 * 4 * 4];
//! let frames = vec![
//!     analyzer.analyze(&dark, 4, 4, 0.0).unwrap(),
//!     analyzer.analyze(&dark, 4, 4, 0.5).unwrap(),
//!     analyzer.analyze(&bright, 4, 4, 1.0).unwrap(),
//! ];
//!
//! let transitions = TransitionDetector::new().detect_seeded(&frames, 1.5, 7);
//! let correlations = BeatCorrelator::new().correlate(&transitions, &[Beat::new(1.1)], &[]);
//! assert_eq!(correlations.len(), transitions.len());
//! ```

pub mod beats;
pub mod config;
pub mod correlation;
pub mod error;
pub mod export;
pub mod frames;
pub mod pipeline;
pub mod transitions;

// Re-export commonly used types for convenience
pub use crate::{
    beats::{Beat, BeatSet},
    config::Config,
    correlation::{BeatCorrelator, Correlation, CorrelationQuality, Suggestion},
    error::{CutsyncError, Result},
    export::AnalysisReport,
    frames::{FrameStats, FrameStatsAnalyzer},
    pipeline::AnalysisPipeline,
    transitions::{Transition, TransitionDetector, TransitionType},
};
