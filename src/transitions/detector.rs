use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::DetectionConfig;
use crate::error::DetectionError;
use crate::frames::FrameStats;
use crate::transitions::types::{cues_for, timeline_order, Transition, TransitionType};

/// Maximum summed per-channel difference (3 * 255)
const MAX_COLOR_DIFF: f64 = 765.0;

/// Histogram buckets across all three channels
const TOTAL_BUCKETS: f64 = 48.0;

/// Adaptive thresholds derived from a frame sequence's brightness spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub brightness: f64,
    pub color: f64,
}

/// Raw and normalized differences between two consecutive frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDiff {
    pub brightness_diff: f64,
    pub color_diff_r: f64,
    pub total_color_diff: f64,
    pub edge_diff: f64,
    pub histogram_diff: f64,
    pub detection_score: f64,
}

/// Detects and classifies transitions in an ordered frame-statistics sequence
///
/// Detection is a single sequential pass over consecutive frame pairs
/// followed by a greedy deduplication. Two classification branches pick the
/// transition type at random; the random source is supplied by the caller so
/// results can be pinned with a seed.
pub struct TransitionDetector {
    config: DetectionConfig,
}

impl TransitionDetector {
    /// Create a detector with default thresholds
    pub fn new() -> Self {
        Self::with_config(DetectionConfig::default())
    }

    /// Create a detector with custom thresholds
    pub fn with_config(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect transitions using a seeded random source
    pub fn detect_seeded(&self, frames: &[FrameStats], duration: f64, seed: u64) -> Vec<Transition> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.detect(frames, duration, &mut rng)
    }

    /// Detect transitions in `frames`
    ///
    /// Returns a list sorted by timestamp in which consecutive entries are
    /// more than `min_separation` apart. Never fails: sequences with fewer
    /// than two usable frames produce an empty list.
    pub fn detect<R: Rng + ?Sized>(&self, frames: &[FrameStats], duration: f64, rng: &mut R) -> Vec<Transition> {
        let thresholds = match self.thresholds(frames) {
            Ok(thresholds) => thresholds,
            Err(reason) => {
                debug!("No transitions detected: {}", reason);
                return Vec::new();
            }
        };

        debug!(
            "Detecting transitions over {:.2}s ({} frames), brightness threshold {:.2}, color threshold {:.2}",
            duration, frames.len(), thresholds.brightness, thresholds.color
        );

        let mut candidates = Vec::new();

        for pair in frames.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if !prev.has_brightness() || !curr.has_brightness() {
                continue;
            }

            let diff = self.compare(prev, curr, frames.len());
            if !self.triggers(&diff, &thresholds) {
                continue;
            }

            let (kind, base_confidence, visual_cue, audio_cue) = self.classify(&diff, &thresholds, rng);
            let confidence = (base_confidence + diff.detection_score * 0.4).min(self.config.max_confidence);

            candidates.push(Transition {
                timestamp: curr.timestamp,
                kind,
                confidence,
                visual_cue: visual_cue.to_string(),
                audio_cue: audio_cue.to_string(),
                detection_score: diff.detection_score,
            });
        }

        let raw = candidates.len();
        let mut transitions = deduplicate(candidates, self.config.min_separation);
        transitions.sort_by(timeline_order);

        info!("Detected {} transitions ({} raw triggers)", transitions.len(), raw);
        transitions
    }

    /// Derive adaptive thresholds from the brightness spread of `frames`
    pub fn thresholds(&self, frames: &[FrameStats]) -> Result<Thresholds, DetectionError> {
        let brightnesses: Vec<f64> = frames
            .iter()
            .filter(|f| f.has_brightness())
            .map(|f| f.avg_brightness)
            .collect();

        if brightnesses.len() < 2 {
            return Err(DetectionError::InsufficientFrames { usable: brightnesses.len() });
        }

        let n = brightnesses.len() as f64;
        let mean = brightnesses.iter().sum::<f64>() / n;
        let variance = brightnesses.iter().map(|b| (b - mean).powi(2)).sum::<f64>() / n;
        let stddev = variance.sqrt();

        Ok(Thresholds {
            brightness: self.config.min_brightness_threshold.max(stddev * self.config.brightness_stddev_factor),
            color: self.config.min_color_threshold.max(stddev * self.config.color_stddev_factor),
        })
    }

    /// Measure the differences between two frames
    ///
    /// `frame_count` is the length of the whole sequence and scales the
    /// histogram score.
    pub fn compare(&self, prev: &FrameStats, curr: &FrameStats, frame_count: usize) -> FrameDiff {
        let brightness_diff = (curr.avg_brightness - prev.avg_brightness).abs();
        let color_diff_r = (curr.avg_r - prev.avg_r).abs();
        let color_diff_g = (curr.avg_g - prev.avg_g).abs();
        let color_diff_b = (curr.avg_b - prev.avg_b).abs();
        let total_color_diff = color_diff_r + color_diff_g + color_diff_b;
        let edge_diff = (curr.edge_strength - prev.edge_strength).abs();
        let histogram_diff = prev.color_histogram.difference(&curr.color_histogram) as f64;

        let scores = [
            brightness_diff / 255.0,
            total_color_diff / MAX_COLOR_DIFF,
            edge_diff / 100.0,
            histogram_diff / (frame_count.max(1) as f64 * TOTAL_BUCKETS),
        ];
        let detection_score: f64 = scores
            .iter()
            .zip(self.config.weights.iter())
            .map(|(score, weight)| score * weight)
            .sum();

        FrameDiff {
            brightness_diff,
            color_diff_r,
            total_color_diff,
            edge_diff,
            histogram_diff,
            detection_score,
        }
    }

    fn triggers(&self, diff: &FrameDiff, thresholds: &Thresholds) -> bool {
        diff.detection_score > self.config.score_trigger
            || diff.brightness_diff > thresholds.brightness
            || diff.total_color_diff > thresholds.color
            || diff.histogram_diff > self.config.histogram_trigger
    }

    /// Pick a type, base confidence and cue text; first matching branch wins
    fn classify<R: Rng + ?Sized>(
        &self,
        diff: &FrameDiff,
        thresholds: &Thresholds,
        rng: &mut R,
    ) -> (TransitionType, f64, &'static str, &'static str) {
        let branch = if diff.brightness_diff > thresholds.brightness * 3.5 {
            Some((TransitionType::Fade, 0.88))
        } else if diff.histogram_diff > self.config.cut_histogram_threshold
            || diff.total_color_diff > thresholds.color * 4.0
        {
            Some((TransitionType::Cut, 0.94))
        } else if diff.brightness_diff > thresholds.brightness * 1.5
            && diff.total_color_diff > thresholds.color * 1.5
        {
            Some((TransitionType::Dissolve, 0.80))
        } else if diff.edge_diff > self.config.motion_edge_threshold
            || diff.color_diff_r > thresholds.color * 0.8
        {
            let kind = if rng.gen_bool(0.5) { TransitionType::Wipe } else { TransitionType::Pan };
            Some((kind, 0.75))
        } else {
            None
        };

        if let Some((kind, base)) = branch {
            let (visual, audio) = cues_for(kind);
            return (kind, base, visual, audio);
        }

        // Weak signal: subtler cue text than the stock descriptions
        let audio = "Audio perspective shift matching visual transition dynamics";
        let (kind, visual) = match rng.gen_range(0..3) {
            0 => (TransitionType::Zoom, "Scale change in frame content suggesting zoom transition"),
            1 => (TransitionType::Pan, "Lateral movement indicating camera pan or scene shift"),
            _ => (TransitionType::Dissolve, "Subtle blending between consecutive frames"),
        };
        let confidence = 0.68 + rng.gen::<f64>() * 0.12;
        (kind, confidence, visual, audio)
    }
}

impl Default for TransitionDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop candidates closer than `min_separation` to the last kept one
///
/// Greedy and first-wins: a later candidate inside the window is dropped
/// even when its confidence is higher.
pub fn deduplicate(candidates: Vec<Transition>, min_separation: f64) -> Vec<Transition> {
    let mut kept: Vec<Transition> = Vec::with_capacity(candidates.len());
    let mut last = -1.0;

    for transition in candidates {
        if transition.timestamp - last > min_separation {
            last = transition.timestamp;
            kept.push(transition);
        }
    }

    kept
}
