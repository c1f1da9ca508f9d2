use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for cutsync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Frame sampling and loading settings
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Transition detection thresholds
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Beat correlation windows
    #[serde(default)]
    pub correlation: CorrelationConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        self.detection.validate()?;
        self.correlation.validate()?;
        Ok(())
    }
}

/// Frame sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Frames sampled per second of video
    pub sample_rate_hz: f64,

    /// Upper bound on sampled frames per video
    pub max_samples: usize,

    /// Number of threads used for per-frame statistics
    pub processing_threads: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 10.0,
            max_samples: 300,
            processing_threads: num_cpus::get(),
        }
    }
}

impl SamplingConfig {
    fn validate(&self) -> Result<()> {
        if !(self.sample_rate_hz > 0.0) || !self.sample_rate_hz.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "sampling.sample_rate_hz".to_string(),
                value: self.sample_rate_hz.to_string()
            }.into());
        }

        if self.max_samples == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sampling.max_samples".to_string(),
                value: self.max_samples.to_string()
            }.into());
        }

        if self.processing_threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sampling.processing_threads".to_string(),
                value: self.processing_threads.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Transition detection thresholds and weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Floor for the adaptive brightness threshold
    pub min_brightness_threshold: f64,

    /// Brightness stddev multiplier for the brightness threshold
    pub brightness_stddev_factor: f64,

    /// Floor for the adaptive color threshold
    pub min_color_threshold: f64,

    /// Brightness stddev multiplier for the color threshold
    pub color_stddev_factor: f64,

    /// Weighted score above which a frame pair triggers
    pub score_trigger: f64,

    /// Raw histogram difference above which a frame pair triggers
    pub histogram_trigger: f64,

    /// Histogram difference that classifies a hard cut
    pub cut_histogram_threshold: f64,

    /// Edge difference that classifies a wipe/pan
    pub motion_edge_threshold: f64,

    /// Score weights: brightness, color, edge, histogram
    pub weights: [f64; 4],

    /// Minimum separation between kept transitions (seconds)
    pub min_separation: f64,

    /// Cap on reported confidence
    pub max_confidence: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_brightness_threshold: 8.0,
            brightness_stddev_factor: 0.4,
            min_color_threshold: 25.0,
            color_stddev_factor: 1.2,
            score_trigger: 0.06,
            histogram_trigger: 800.0,
            cut_histogram_threshold: 2500.0,
            motion_edge_threshold: 4.0,
            weights: [0.35, 0.35, 0.15, 0.15],
            min_separation: 0.25,
            max_confidence: 0.98,
        }
    }
}

impl DetectionConfig {
    fn validate(&self) -> Result<()> {
        if self.weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ConfigError::InvalidValue {
                key: "detection.weights".to_string(),
                value: format!("{:?}", self.weights)
            }.into());
        }

        if self.min_separation < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "detection.min_separation".to_string(),
                value: self.min_separation.to_string()
            }.into());
        }

        if !(0.0..=1.0).contains(&self.max_confidence) {
            return Err(ConfigError::InvalidValue {
                key: "detection.max_confidence".to_string(),
                value: self.max_confidence.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Beat correlation windows and quality bands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Search window for strong beats (seconds)
    pub strong_window: f64,

    /// Search window for regular beats (seconds)
    pub regular_window: f64,

    /// Upper bounds for excellent, good and fair quality (seconds)
    pub quality_bands: [f64; 3],

    /// Distance beyond which a transition should be retimed
    pub adjustment_threshold: f64,

    /// Stddev multiplier used when picking strong beats from a plain beat list
    pub strong_beat_prominence: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            strong_window: 2.0,
            regular_window: 1.0,
            quality_bands: [0.5, 1.0, 2.0],
            adjustment_threshold: 0.5,
            strong_beat_prominence: 1.5,
        }
    }
}

impl CorrelationConfig {
    fn validate(&self) -> Result<()> {
        if self.strong_window <= 0.0 || self.regular_window <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "correlation.windows".to_string(),
                value: format!("{}/{}", self.strong_window, self.regular_window)
            }.into());
        }

        let [excellent, good, fair] = self.quality_bands;
        if !(excellent <= good && good <= fair) {
            return Err(ConfigError::InvalidValue {
                key: "correlation.quality_bands".to_string(),
                value: format!("{:?}", self.quality_bands)
            }.into());
        }

        Ok(())
    }
}
