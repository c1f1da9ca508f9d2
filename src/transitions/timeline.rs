use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::correlation::Suggestion;
use crate::error::{Result, TimelineError};
use crate::transitions::types::{timeline_order, Transition, TransitionType};

/// An editable list of transitions kept in timeline order
///
/// Every mutation re-sorts, so callers never observe an out-of-order list
/// after inserting or retiming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTimeline {
    transitions: Vec<Transition>,
}

/// The span of video between one transition and the next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub transition_type: TransitionType,
}

impl TimelineSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl TransitionTimeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list, sorting it into timeline order
    pub fn from_transitions(mut transitions: Vec<Transition>) -> Self {
        transitions.sort_by(timeline_order);
        Self { transitions }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn into_inner(self) -> Vec<Transition> {
        self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Insert a transition and return its index after sorting
    pub fn insert(&mut self, transition: Transition) -> Result<usize> {
        validate_timestamp(transition.timestamp)?;

        // lands after existing entries that sort equal
        let index = self
            .transitions
            .partition_point(|existing| timeline_order(existing, &transition).is_le());
        self.transitions.insert(index, transition);
        Ok(index)
    }

    /// Remove the transition at `index`
    pub fn remove(&mut self, index: usize) -> Option<Transition> {
        if index < self.transitions.len() {
            Some(self.transitions.remove(index))
        } else {
            None
        }
    }

    /// Move the transition at `index` to `timestamp`
    pub fn retime(&mut self, index: usize, timestamp: f64) -> Result<()> {
        validate_timestamp(timestamp)?;

        let len = self.transitions.len();
        let transition = self
            .transitions
            .get_mut(index)
            .ok_or(TimelineError::IndexOutOfRange { index, len })?;
        transition.timestamp = timestamp;

        self.transitions.sort_by(timeline_order);
        Ok(())
    }

    /// Retime every transition a suggestion was made for
    ///
    /// A suggestion matches the first not-yet-claimed transition whose
    /// timestamp before any moves equals its `original_timestamp`, so a
    /// transition is moved at most once. Returns how many transitions moved.
    pub fn apply_suggestions(&mut self, suggestions: &[Suggestion]) -> usize {
        let originals: Vec<f64> = self.transitions.iter().map(|t| t.timestamp).collect();
        let mut claimed = vec![false; originals.len()];
        let mut moved = 0;

        for suggestion in suggestions {
            if !suggestion.suggested_timestamp.is_finite() || suggestion.suggested_timestamp < 0.0 {
                continue;
            }

            let target = originals
                .iter()
                .enumerate()
                .position(|(i, &ts)| !claimed[i] && ts == suggestion.original_timestamp);

            if let Some(index) = target {
                claimed[index] = true;
                self.transitions[index].timestamp = suggestion.suggested_timestamp;
                moved += 1;
            }
        }

        self.transitions.sort_by(timeline_order);
        debug!("Applied {} of {} timing suggestions", moved, suggestions.len());
        moved
    }

    /// Derive the segment each transition starts, ending at the next
    /// transition or at `duration`
    pub fn segments(&self, duration: f64) -> Vec<TimelineSegment> {
        self.transitions
            .iter()
            .enumerate()
            .map(|(index, transition)| TimelineSegment {
                index,
                start: transition.timestamp,
                end: self
                    .transitions
                    .get(index + 1)
                    .map(|next| next.timestamp)
                    .unwrap_or(duration),
                transition_type: transition.kind,
            })
            .collect()
    }
}

fn validate_timestamp(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TimelineError::InvalidTimestamp { value }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> TransitionTimeline {
        TransitionTimeline::from_transitions(vec![
            Transition::new(3.0, TransitionType::Fade, 0.9),
            Transition::new(1.0, TransitionType::Cut, 0.95),
            Transition::new(2.0, TransitionType::Wipe, 0.8),
        ])
    }

    fn timestamps(timeline: &TransitionTimeline) -> Vec<f64> {
        timeline.transitions().iter().map(|t| t.timestamp).collect()
    }

    #[test]
    fn test_from_transitions_sorts() {
        assert_eq!(timestamps(&timeline()), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut timeline = timeline();
        let index = timeline.insert(Transition::new(2.5, TransitionType::Zoom, 0.7)).unwrap();

        assert_eq!(index, 2);
        assert_eq!(timestamps(&timeline), vec![1.0, 2.0, 2.5, 3.0]);
        assert!(timeline.insert(Transition::new(f64::NAN, TransitionType::Cut, 0.5)).is_err());
    }

    #[test]
    fn test_retime_resorts() {
        let mut timeline = timeline();
        timeline.retime(0, 4.0).unwrap();

        assert_eq!(timestamps(&timeline), vec![2.0, 3.0, 4.0]);
        assert_eq!(timeline.transitions()[2].kind, TransitionType::Cut);

        assert!(timeline.retime(9, 1.0).is_err());
        assert!(timeline.retime(0, -1.0).is_err());
    }

    #[test]
    fn test_remove() {
        let mut timeline = timeline();
        let removed = timeline.remove(1).unwrap();

        assert_eq!(removed.kind, TransitionType::Wipe);
        assert_eq!(timeline.len(), 2);
        assert!(timeline.remove(5).is_none());
    }

    #[test]
    fn test_apply_suggestions() {
        let mut timeline = timeline();
        let suggestions = vec![
            Suggestion {
                original_timestamp: 1.0,
                suggested_timestamp: 3.5,
                beat_type: "hook".to_string(),
                confidence: 0.9,
                transition_type: TransitionType::Cut,
            },
            Suggestion {
                original_timestamp: 7.0,
                suggested_timestamp: 8.0,
                beat_type: "hook".to_string(),
                confidence: 0.9,
                transition_type: TransitionType::Cut,
            },
        ];

        assert_eq!(timeline.apply_suggestions(&suggestions), 1);
        assert_eq!(timestamps(&timeline), vec![2.0, 3.0, 3.5]);
    }

    fn suggestion(from: f64, to: f64) -> Suggestion {
        Suggestion {
            original_timestamp: from,
            suggested_timestamp: to,
            beat_type: "strong".to_string(),
            confidence: 0.8,
            transition_type: TransitionType::Cut,
        }
    }

    #[test]
    fn test_apply_chained_suggestions_moves_each_transition_once() {
        let mut timeline = TransitionTimeline::from_transitions(vec![
            Transition::new(1.0, TransitionType::Cut, 0.9),
            Transition::new(2.0, TransitionType::Fade, 0.9),
        ]);

        let moved = timeline.apply_suggestions(&[suggestion(1.0, 2.0), suggestion(2.0, 3.0)]);

        assert_eq!(moved, 2);
        let placed: Vec<(f64, TransitionType)> =
            timeline.transitions().iter().map(|t| (t.timestamp, t.kind)).collect();
        assert_eq!(placed, vec![(2.0, TransitionType::Cut), (3.0, TransitionType::Fade)]);
    }

    #[test]
    fn test_apply_suggestions_with_duplicate_originals() {
        let mut timeline = TransitionTimeline::from_transitions(vec![
            Transition::new(1.0, TransitionType::Cut, 0.9),
            Transition::new(1.0, TransitionType::Fade, 0.8),
        ]);

        let moved = timeline.apply_suggestions(&[suggestion(1.0, 4.0), suggestion(1.0, 5.0)]);

        assert_eq!(moved, 2);
        assert_eq!(timestamps(&timeline), vec![4.0, 5.0]);
    }

    #[test]
    fn test_segments_end_at_duration() {
        let segments = timeline().segments(10.0);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start, 1.0);
        assert_eq!(segments[0].end, 2.0);
        assert_eq!(segments[2].end, 10.0);
        assert_eq!(segments[2].duration(), 7.0);
        assert_eq!(segments[1].transition_type, TransitionType::Wipe);
    }
}
