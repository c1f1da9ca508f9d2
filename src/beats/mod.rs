//! # Beat Input Module
//!
//! Beats arrive from an external beat tracker as a list of all beats plus a
//! subset of strong (hook/drop) beats. This module models that input, loads
//! it from JSON, and can derive the strong subset when a tracker only
//! reports per-beat confidences.

pub mod strong;
pub mod types;

pub use strong::{select_strong_beats, HOOK_BEAT};
pub use types::{Beat, BeatSet, REGULAR_BEAT};
