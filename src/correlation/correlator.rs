use tracing::{debug, info};

use crate::beats::{Beat, REGULAR_BEAT};
use crate::config::CorrelationConfig;
use crate::correlation::types::{Correlation, CorrelationQuality, CorrelationSummary, Suggestion};
use crate::error::CorrelationError;
use crate::transitions::Transition;

/// Confidence assumed for a stride-mapped strong beat without one
const DEFAULT_STRONG_CONFIDENCE: f64 = 0.8;

/// Confidence assumed for a proportionally mapped or missing beat
const DEFAULT_REGULAR_CONFIDENCE: f64 = 0.5;

/// Matches detected transitions against audio beats
///
/// Both operations are pure: the same inputs always produce the same
/// correlations and suggestions.
pub struct BeatCorrelator {
    config: CorrelationConfig,
}

impl BeatCorrelator {
    pub fn new() -> Self {
        Self::with_config(CorrelationConfig::default())
    }

    pub fn with_config(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Produce one correlation per transition
    ///
    /// Strong beats are searched first within the strong window; regular
    /// beats are only consulted when no strong beat qualifies. On equal
    /// distances the earlier beat in the list wins.
    pub fn correlate(&self, transitions: &[Transition], beats: &[Beat], strong_beats: &[Beat]) -> Vec<Correlation> {
        if beats.is_empty() && strong_beats.is_empty() {
            debug!("{}; every transition will be unmatched", CorrelationError::NoBeatsAvailable);
        }

        let correlations: Vec<Correlation> = transitions
            .iter()
            .map(|transition| self.correlate_one(transition, beats, strong_beats))
            .collect();

        info!(
            "Correlated {} transitions against {} beats ({} strong)",
            correlations.len(), beats.len(), strong_beats.len()
        );
        correlations
    }

    fn correlate_one(&self, transition: &Transition, beats: &[Beat], strong_beats: &[Beat]) -> Correlation {
        let strong = nearest_beat(strong_beats, transition.timestamp, self.config.strong_window);
        let (matched, is_strong) = match strong {
            Some(found) => (Some(found), true),
            None => (nearest_beat(beats, transition.timestamp, self.config.regular_window), false),
        };

        let (beat, distance) = match matched {
            Some((beat, distance)) => (Some(beat.clone()), distance),
            None => (None, f64::INFINITY),
        };

        Correlation {
            transition: transition.clone(),
            beat,
            distance,
            is_strong,
            quality: CorrelationQuality::from_distance(distance, &self.config.quality_bands),
            needs_adjustment: distance > self.config.adjustment_threshold,
        }
    }

    /// Propose a strong-beat timestamp for every transition
    ///
    /// Transition `i` of `T` maps onto strong beat `i * floor(S / T)` when
    /// there are at least as many strong beats as transitions, and onto
    /// `floor(i * S / T)` otherwise. Returns nothing when there are no
    /// strong beats.
    pub fn suggest_optimal_timings(&self, transitions: &[Transition], strong_beats: &[Beat]) -> Vec<Suggestion> {
        if strong_beats.is_empty() {
            debug!("No timing suggestions: {}", CorrelationError::NoBeatsAvailable);
            return Vec::new();
        }
        if transitions.is_empty() {
            return Vec::new();
        }

        let t = transitions.len();
        let s = strong_beats.len();

        let suggestions: Vec<Suggestion> = transitions
            .iter()
            .enumerate()
            .map(|(i, transition)| {
                let (index, default_label, default_confidence) = if s >= t {
                    (i * (s / t), "strong", DEFAULT_STRONG_CONFIDENCE)
                } else {
                    (i * s / t, REGULAR_BEAT, DEFAULT_REGULAR_CONFIDENCE)
                };

                match strong_beats.get(index) {
                    Some(beat) => Suggestion {
                        original_timestamp: transition.timestamp,
                        suggested_timestamp: beat.timestamp,
                        beat_type: if beat.kind.is_empty() {
                            default_label.to_string()
                        } else {
                            beat.kind.clone()
                        },
                        confidence: beat
                            .confidence
                            .filter(|c| *c != 0.0 && !c.is_nan())
                            .unwrap_or(default_confidence),
                        transition_type: transition.kind,
                    },
                    None => Suggestion {
                        original_timestamp: transition.timestamp,
                        suggested_timestamp: transition.timestamp,
                        beat_type: REGULAR_BEAT.to_string(),
                        confidence: DEFAULT_REGULAR_CONFIDENCE,
                        transition_type: transition.kind,
                    },
                }
            })
            .collect();

        debug!("Suggested {} retimings onto {} strong beats", suggestions.len(), s);
        suggestions
    }

    /// Count correlations per quality band
    pub fn summarize(&self, correlations: &[Correlation]) -> CorrelationSummary {
        let mut summary = CorrelationSummary {
            total: correlations.len(),
            ..Default::default()
        };

        let mut synced = 0usize;
        for correlation in correlations {
            if correlation.quality.is_synced() {
                synced += 1;
            }
            match correlation.quality {
                CorrelationQuality::Excellent => summary.excellent += 1,
                CorrelationQuality::Good => summary.good += 1,
                CorrelationQuality::Fair => summary.fair += 1,
                CorrelationQuality::Poor => summary.poor += 1,
            }
            if correlation.is_strong {
                summary.strong_matches += 1;
            }
            if correlation.needs_adjustment {
                summary.needs_adjustment += 1;
            }
        }

        if summary.total > 0 {
            summary.sync_ratio = synced as f64 / summary.total as f64;
        }
        summary
    }
}

impl Default for BeatCorrelator {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest beat strictly inside `window` seconds of `timestamp`
fn nearest_beat(beats: &[Beat], timestamp: f64, window: f64) -> Option<(&Beat, f64)> {
    let mut best = None;
    let mut min_distance = window;

    for beat in beats {
        let distance = (beat.timestamp - timestamp).abs();
        if distance < min_distance {
            min_distance = distance;
            best = Some((beat, distance));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transitions::TransitionType;

    fn transition(timestamp: f64) -> Transition {
        Transition::new(timestamp, TransitionType::Cut, 0.9)
    }

    fn beats(times: &[f64]) -> Vec<Beat> {
        times.iter().map(|&t| Beat::new(t)).collect()
    }

    #[test]
    fn test_strong_beat_match() {
        let strong = vec![Beat::new(5.0).with_kind("bass_drop").with_confidence(0.9)];
        let correlations = BeatCorrelator::new().correlate(&[transition(5.3)], &[], &strong);

        assert_eq!(correlations.len(), 1);
        let c = &correlations[0];
        assert!(c.is_strong);
        assert!((c.distance - 0.3).abs() < 1e-9);
        assert_eq!(c.quality, CorrelationQuality::Excellent);
        assert!(!c.needs_adjustment);
        assert_eq!(c.beat.as_ref().unwrap().kind, "bass_drop");
    }

    #[test]
    fn test_strong_window_beats_closer_regular_beat() {
        let correlations = BeatCorrelator::new().correlate(
            &[transition(10.0)],
            &beats(&[10.05]),
            &beats(&[11.5]),
        );

        let c = &correlations[0];
        assert!(c.is_strong);
        assert!((c.distance - 1.5).abs() < 1e-9);
        assert_eq!(c.quality, CorrelationQuality::Fair);
        assert!(c.needs_adjustment);
    }

    #[test]
    fn test_falls_back_to_regular_beats() {
        let correlations = BeatCorrelator::new().correlate(
            &[transition(10.0)],
            &beats(&[9.0, 10.6, 12.0]),
            &beats(&[13.0]),
        );

        let c = &correlations[0];
        assert!(!c.is_strong);
        assert!((c.distance - 0.6).abs() < 1e-9);
        assert_eq!(c.quality, CorrelationQuality::Good);
        assert!(c.needs_adjustment);
    }

    #[test]
    fn test_unmatched_transition() {
        let correlations = BeatCorrelator::new().correlate(&[transition(10.0)], &beats(&[11.0]), &beats(&[12.0]));

        let c = &correlations[0];
        assert!(c.beat.is_none());
        assert!(c.distance.is_infinite());
        assert!(!c.is_strong);
        assert_eq!(c.quality, CorrelationQuality::Poor);
        assert!(c.needs_adjustment);
    }

    #[test]
    fn test_equal_distance_keeps_first_beat() {
        let strong = vec![Beat::new(4.0).with_kind("first"), Beat::new(6.0).with_kind("second")];
        let correlations = BeatCorrelator::new().correlate(&[transition(5.0)], &[], &strong);
        assert_eq!(correlations[0].beat.as_ref().unwrap().kind, "first");
    }

    #[test]
    fn test_quality_matches_distance_for_every_correlation() {
        let transitions: Vec<Transition> = (0..40).map(|i| transition(i as f64 * 0.37)).collect();
        let correlations = BeatCorrelator::new().correlate(
            &transitions,
            &beats(&[1.0, 3.3, 7.9, 12.2]),
            &beats(&[5.0, 11.0]),
        );

        assert_eq!(correlations.len(), transitions.len());
        for c in &correlations {
            let expected = if c.distance < 0.5 {
                CorrelationQuality::Excellent
            } else if c.distance < 1.0 {
                CorrelationQuality::Good
            } else if c.distance < 2.0 {
                CorrelationQuality::Fair
            } else {
                CorrelationQuality::Poor
            };
            assert_eq!(c.quality, expected);
            assert_eq!(c.needs_adjustment, c.distance > 0.5);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let correlator = BeatCorrelator::new();
        assert!(correlator.correlate(&[], &beats(&[1.0]), &[]).is_empty());

        let unmatched = correlator.correlate(&[transition(1.0)], &[], &[]);
        assert_eq!(unmatched.len(), 1);
        assert!(unmatched[0].beat.is_none());
    }

    #[test]
    fn test_suggestions_with_more_strong_beats() {
        let transitions = vec![transition(1.0), transition(2.0)];
        let strong: Vec<Beat> = (0..5)
            .map(|i| Beat::new(i as f64 * 2.0 + 0.5).with_kind("hook").with_confidence(0.9))
            .collect();

        let suggestions = BeatCorrelator::new().suggest_optimal_timings(&transitions, &strong);

        // stride floor(5 / 2) = 2 -> beats 0 and 2
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].suggested_timestamp, 0.5);
        assert_eq!(suggestions[1].suggested_timestamp, 4.5);
        assert_eq!(suggestions[1].original_timestamp, 2.0);
        assert_eq!(suggestions[1].beat_type, "hook");
        assert_eq!(suggestions[1].confidence, 0.9);
        assert_eq!(suggestions[1].transition_type, TransitionType::Cut);
    }

    #[test]
    fn test_suggestions_with_fewer_strong_beats() {
        let transitions: Vec<Transition> = (0..4).map(|i| transition(i as f64)).collect();
        let strong = vec![Beat::new(10.0).with_kind(""), Beat::new(20.0)];

        let suggestions = BeatCorrelator::new().suggest_optimal_timings(&transitions, &strong);

        // floor(i / 4 * 2) -> 0, 0, 1, 1
        let suggested: Vec<f64> = suggestions.iter().map(|s| s.suggested_timestamp).collect();
        assert_eq!(suggested, vec![10.0, 10.0, 20.0, 20.0]);
        assert_eq!(suggestions[0].beat_type, "regular");
        assert_eq!(suggestions[0].confidence, 0.5);
    }

    #[test]
    fn test_zero_confidence_uses_default() {
        let transitions: Vec<Transition> = (0..2).map(|i| transition(i as f64)).collect();
        let correlator = BeatCorrelator::new();

        let strong = vec![
            Beat::new(1.0).with_confidence(0.0),
            Beat::new(2.0).with_confidence(f64::NAN),
        ];
        let suggestions = correlator.suggest_optimal_timings(&transitions, &strong);
        assert_eq!(suggestions[0].confidence, 0.8);
        assert_eq!(suggestions[1].confidence, 0.8);

        let single = vec![Beat::new(1.0).with_confidence(0.0)];
        let suggestions = correlator.suggest_optimal_timings(&transitions, &single);
        assert_eq!(suggestions[0].confidence, 0.5);
    }

    #[test]
    fn test_suggestion_count() {
        let correlator = BeatCorrelator::new();
        let transitions: Vec<Transition> = (0..7).map(|i| transition(i as f64)).collect();

        assert!(correlator.suggest_optimal_timings(&transitions, &[]).is_empty());
        for s in 1..10 {
            let strong = beats(&(0..s).map(|i| i as f64).collect::<Vec<_>>());
            assert_eq!(correlator.suggest_optimal_timings(&transitions, &strong).len(), 7);
        }
    }

    #[test]
    fn test_summary() {
        let correlator = BeatCorrelator::new();
        let correlations = correlator.correlate(
            &[transition(1.0), transition(5.0), transition(9.0)],
            &beats(&[5.7]),
            &beats(&[1.1]),
        );
        let summary = correlator.summarize(&correlations);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.excellent, 1);
        assert_eq!(summary.good, 1);
        assert_eq!(summary.poor, 1);
        assert_eq!(summary.strong_matches, 1);
        assert_eq!(summary.needs_adjustment, 2);
        assert!((summary.sync_ratio - 2.0 / 3.0).abs() < 1e-9);

        assert_eq!(correlator.summarize(&[]).sync_ratio, 0.0);
    }
}
