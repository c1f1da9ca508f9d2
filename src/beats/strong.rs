use tracing::debug;

use crate::beats::types::{Beat, BeatSet};

/// Label given to selected beats that had no specific type
pub const HOOK_BEAT: &str = "hook";

/// Pick the prominent beats out of a plain beat list
///
/// A beat is prominent when its confidence is at least
/// `mean + prominence * stddev` of all beat confidences. Beats without a
/// confidence count as zero.
pub fn select_strong_beats(beats: &[Beat], prominence: f64) -> Vec<Beat> {
    if beats.is_empty() {
        return Vec::new();
    }

    let activations: Vec<f64> = beats.iter().map(|b| b.confidence.unwrap_or(0.0)).collect();
    let n = activations.len() as f64;
    let mean = activations.iter().sum::<f64>() / n;
    let stddev = (activations.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n).sqrt();
    let threshold = mean + prominence * stddev;

    let strong: Vec<Beat> = beats
        .iter()
        .zip(activations.iter())
        .filter(|(_, &activation)| activation >= threshold)
        .map(|(beat, _)| {
            let mut beat = beat.clone();
            if !beat.is_labeled() {
                beat.kind = HOOK_BEAT.to_string();
            }
            beat
        })
        .collect();

    debug!(
        "Selected {} strong beats of {} (threshold {:.3})",
        strong.len(), beats.len(), threshold
    );
    strong
}

impl BeatSet {
    /// Fill `strong_beats` from `beats` when the tracker supplied none
    pub fn ensure_strong_beats(&mut self, prominence: f64) {
        if self.strong_beats.is_empty() {
            self.strong_beats = select_strong_beats(&self.beats, prominence);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_prominent_beats() {
        let beats: Vec<Beat> = [0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.95]
            .iter()
            .enumerate()
            .map(|(i, &c)| Beat::new(i as f64 * 0.5).with_confidence(c))
            .collect();

        let strong = select_strong_beats(&beats, 1.5);
        assert_eq!(strong.len(), 1);
        assert_eq!(strong[0].timestamp, 3.5);
        assert_eq!(strong[0].kind, "hook");
    }

    #[test]
    fn test_keeps_existing_labels() {
        let beats = vec![
            Beat::new(0.0).with_confidence(0.1),
            Beat::new(1.0).with_confidence(0.9).with_kind("bass_drop"),
        ];
        let strong = select_strong_beats(&beats, 0.5);
        assert_eq!(strong.len(), 1);
        assert_eq!(strong[0].kind, "bass_drop");
    }

    #[test]
    fn test_uniform_confidence_keeps_everything() {
        let beats = vec![Beat::new(0.0), Beat::new(1.0)];
        assert_eq!(select_strong_beats(&beats, 1.5).len(), 2);
        assert!(select_strong_beats(&[], 1.5).is_empty());
    }

    #[test]
    fn test_ensure_strong_beats_respects_supplied_subset() {
        let mut set = BeatSet::new(
            vec![Beat::new(0.0).with_confidence(0.1), Beat::new(1.0).with_confidence(0.9)],
            vec![Beat::new(5.0).with_kind("buildup")],
        );
        set.ensure_strong_beats(1.0);
        assert_eq!(set.strong_beats.len(), 1);
        assert_eq!(set.strong_beats[0].timestamp, 5.0);

        set.strong_beats.clear();
        set.ensure_strong_beats(0.5);
        assert_eq!(set.strong_beats[0].timestamp, 1.0);
    }
}
