//! # Beat Correlation Module
//!
//! Matches detected transitions against the nearest strong or regular beat,
//! grades how well each one lines up, and proposes strong-beat retimings.
//!
//! ## Example
//!
//! ```rust
//! use cutsync::beats::Beat;
//! use cutsync::correlation::{BeatCorrelator, CorrelationQuality};
//! use cutsync::transitions::{Transition, TransitionType};
//!
//! let correlator = BeatCorrelator::new();
//! let transitions = vec![Transition::new(5.3, TransitionType::Cut, 0.9)];
//! let strong = vec![Beat::new(5.0).with_kind("bass_drop")];
//!
//! let correlations = correlator.correlate(&transitions, &[], &strong);
//! assert_eq!(correlations[0].quality, CorrelationQuality::Excellent);
//! ```

pub mod correlator;
pub mod types;

pub use correlator::BeatCorrelator;
pub use types::{Correlation, CorrelationQuality, CorrelationSummary, Suggestion};
