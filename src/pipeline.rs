use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    beats::BeatSet,
    config::Config,
    correlation::{BeatCorrelator, CorrelationSummary},
    error::{CorrelationError, CutsyncError, Result},
    export::AnalysisReport,
    frames::{FrameLoader, LoadedFrames},
    transitions::{Transition, TransitionDetector},
};

/// Runs a full analysis from a frame directory to a report
///
/// The pipeline follows these steps:
/// 1. Beat Loading - Read the beat tracker output, if one was given
/// 2. Frame Analysis - Sample the frame directory and compute statistics
/// 3. Transition Detection - Compare consecutive frames
/// 4. Correlation - Match transitions to beats and suggest retimings
pub struct AnalysisPipeline {
    config: Config,
}

impl AnalysisPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze `frames_dir` and correlate against `beats_path` when given
    ///
    /// # Arguments
    ///
    /// * `frames_dir` - Directory of sampled frame images, ordered by file name
    /// * `beats_path` - Beat tracker JSON; without it correlations are empty
    /// * `duration` - Video duration in seconds; falls back to the beat file's
    ///   duration, then to the span the sampled frames cover
    /// * `seed` - Seed for the classification draws; random when absent
    pub async fn run<P: AsRef<Path>>(
        &self,
        frames_dir: P,
        beats_path: Option<P>,
        duration: Option<f64>,
        seed: Option<u64>,
    ) -> Result<AnalysisReport> {
        let frames_dir = frames_dir.as_ref().to_path_buf();

        info!("Starting cutsync analysis");
        info!("   Frames: {:?}", frames_dir);

        // Step 1: beats first so their duration can drive sampling
        let beats = match beats_path {
            Some(path) => Some(self.load_beats(path.as_ref()).await?),
            None => None,
        };
        let duration = duration.or_else(|| beats.as_ref().and_then(|b| b.duration));

        // Step 2
        let loaded = self.load_frames(frames_dir, duration).await?;

        // Step 3
        let transitions = self.detect_transitions(&loaded, seed).await?;

        // Step 4
        let report = match beats {
            Some(beats) => self.correlate(&loaded, transitions, &beats),
            None => {
                warn!("{}; report will hold transitions only", CorrelationError::NoBeatsAvailable);
                AnalysisReport::new(
                    loaded.duration,
                    loaded.frames.len(),
                    transitions,
                    Vec::new(),
                    Vec::new(),
                    CorrelationSummary::default(),
                )
            }
        };

        info!(
            "Analysis complete: {} transitions, {} suggestions",
            report.transitions.len(), report.suggestions.len()
        );
        Ok(report)
    }

    async fn load_beats(&self, path: &Path) -> Result<BeatSet> {
        info!("Step 1: Loading beats from {:?}", path);

        let path = path.to_path_buf();
        let prominence = self.config.correlation.strong_beat_prominence;
        let beats = tokio::task::spawn_blocking(move || -> Result<BeatSet> {
            let mut beats = BeatSet::from_json_file(&path)?;
            beats.ensure_strong_beats(prominence);
            Ok(beats)
        })
        .await
        .map_err(|e| CutsyncError::generic(format!("Beat loading task failed: {}", e)))??;

        info!("   {} beats, {} strong", beats.beats.len(), beats.strong_beats.len());
        Ok(beats)
    }

    async fn load_frames(&self, frames_dir: PathBuf, duration: Option<f64>) -> Result<LoadedFrames> {
        info!("Step 2: Analyzing frames...");

        let loader = FrameLoader::new(self.config.sampling.clone());
        let loaded = tokio::task::spawn_blocking(move || loader.load_directory(&frames_dir, duration))
            .await
            .map_err(|e| CutsyncError::generic(format!("Frame analysis task failed: {}", e)))??;

        info!("   {} frames over {:.2}s", loaded.frames.len(), loaded.duration);
        if loaded.skipped > 0 {
            warn!("   {} frames could not be read", loaded.skipped);
        }
        Ok(loaded)
    }

    async fn detect_transitions(&self, loaded: &LoadedFrames, seed: Option<u64>) -> Result<Vec<Transition>> {
        info!("Step 3: Detecting transitions...");

        let detector = TransitionDetector::with_config(self.config.detection.clone());
        let frames = loaded.frames.clone();
        let duration = loaded.duration;

        let transitions = tokio::task::spawn_blocking(move || match seed {
            Some(seed) => {
                debug!("Using classification seed {}", seed);
                detector.detect_seeded(&frames, duration, seed)
            }
            None => detector.detect(&frames, duration, &mut rand::thread_rng()),
        })
        .await
        .map_err(|e| CutsyncError::generic(format!("Detection task failed: {}", e)))?;

        Ok(transitions)
    }

    fn correlate(&self, loaded: &LoadedFrames, transitions: Vec<Transition>, beats: &BeatSet) -> AnalysisReport {
        info!("Step 4: Correlating with beats...");

        let correlator = BeatCorrelator::with_config(self.config.correlation.clone());
        let correlations = correlator.correlate(&transitions, &beats.beats, &beats.strong_beats);
        let suggestions = correlator.suggest_optimal_timings(&transitions, &beats.strong_beats);
        let summary = correlator.summarize(&correlations);

        info!(
            "   {:.0}% of transitions in sync, {} need adjustment",
            summary.sync_ratio * 100.0, summary.needs_adjustment
        );

        AnalysisReport::new(
            loaded.duration,
            loaded.frames.len(),
            transitions,
            correlations,
            suggestions,
            summary,
        )
    }
}
