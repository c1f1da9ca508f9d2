use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::SamplingConfig;
use crate::error::{CutsyncError, FrameError, Result};
use crate::frames::analyzer::FrameStatsAnalyzer;
use crate::frames::types::{FrameStats, LoadedFrames};

/// Timestamps at which a video of a given duration is sampled
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPlan {
    duration: f64,
    timestamps: Vec<f64>,
}

impl SamplingPlan {
    /// Sample `rate_hz` frames per second, capped at `max_samples`.
    ///
    /// Sample `i` of `n` lands at `i / n * duration`, so the last sample
    /// sits one interval before the end of the video.
    pub fn for_duration(duration: f64, rate_hz: f64, max_samples: usize) -> Self {
        let wanted = if duration.is_finite() && duration > 0.0 {
            (duration * rate_hz).floor() as usize
        } else {
            0
        };
        Self::evenly_spaced(wanted.min(max_samples), duration)
    }

    /// Spread `count` samples evenly over `duration`
    pub fn evenly_spaced(count: usize, duration: f64) -> Self {
        let timestamps = (0..count)
            .map(|i| (i as f64 / count as f64) * duration)
            .collect();
        Self { duration, timestamps }
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Loads a directory of decoded frame images and reduces them to statistics
///
/// Frame images are ordered by file name (`frame_0001.png`, ...). Frames
/// that cannot be decoded or carry no pixels are skipped, never fatal.
pub struct FrameLoader {
    config: SamplingConfig,
    analyzer: FrameStatsAnalyzer,
}

impl FrameLoader {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            analyzer: FrameStatsAnalyzer::new(),
        }
    }

    /// Check whether a path looks like a supported frame image
    pub fn is_image_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp"))
            .unwrap_or(false)
    }

    /// List frame images in a directory, sorted by file name
    pub fn discover_frames<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FrameError::LoadFailed { path: dir.display().to_string() }.into());
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && Self::is_image_file(path))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(FrameError::NoFramesFound { path: dir.display().to_string() }.into());
        }

        debug!("Discovered {} frame images in {:?}", files.len(), dir);
        Ok(files)
    }

    /// Load and analyze the frames in `dir`
    ///
    /// With a known `duration` the directory is treated as covering the whole
    /// video and is subsampled to the configured rate. Without one, each
    /// image is assumed to be one frame at the configured rate, so the
    /// directory spans `files / sample_rate_hz` seconds and is capped at
    /// `max_samples` evenly spaced samples over that span.
    pub fn load_directory<P: AsRef<Path>>(&self, dir: P, duration: Option<f64>) -> Result<LoadedFrames> {
        let files = self.discover_frames(&dir)?;
        let (plan, duration) = match duration {
            Some(duration) => (self.plan_for(files.len(), duration), duration),
            None => {
                let duration = files.len() as f64 / self.config.sample_rate_hz;
                let count = files.len().min(self.config.max_samples);
                (SamplingPlan::evenly_spaced(count, duration), duration)
            }
        };

        // sample i of n maps onto file floor(i * files / n)
        let selected: Vec<(f64, &PathBuf)> = plan
            .timestamps()
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, &files[(i * files.len() / plan.len()).min(files.len() - 1)]))
            .collect();

        info!("Analyzing {} of {} frame images over {:.2}s", selected.len(), files.len(), duration);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.processing_threads)
            .build()
            .map_err(|e| CutsyncError::generic(format!("Failed to build frame worker pool: {}", e)))?;

        let results: Vec<std::result::Result<FrameStats, FrameError>> = pool.install(|| {
            selected
                .par_iter()
                .map(|(timestamp, path)| self.load_frame(path, *timestamp))
                .collect()
        });

        let mut frames = Vec::with_capacity(results.len());
        let mut skipped = 0;
        for (result, (timestamp, path)) in results.into_iter().zip(selected.iter()) {
            match result {
                Ok(stats) => frames.push(stats),
                Err(e) => {
                    warn!("Skipping frame {:?} at {:.2}s: {}", path, timestamp, e);
                    skipped += 1;
                }
            }
        }

        info!("Analyzed {} frames ({} skipped)", frames.len(), skipped);
        Ok(LoadedFrames { frames, duration, skipped })
    }

    /// Decode a single frame image and compute its statistics
    pub fn load_frame<P: AsRef<Path>>(&self, path: P, timestamp: f64) -> std::result::Result<FrameStats, FrameError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|_| FrameError::LoadFailed {
            path: path.display().to_string(),
        })?;

        self.analyzer.analyze_image(&image.to_rgba8(), timestamp)
    }

    fn plan_for(&self, available: usize, duration: f64) -> SamplingPlan {
        let plan = SamplingPlan::for_duration(duration, self.config.sample_rate_hz, self.config.max_samples);

        if plan.is_empty() || available <= plan.len() {
            SamplingPlan::evenly_spaced(available.min(self.config.max_samples), duration)
        } else {
            plan
        }
    }
}

impl Default for FrameLoader {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}
