//! # Transition Detection Module
//!
//! Finds and classifies scene changes (cut, fade, dissolve, wipe, zoom, pan)
//! in an ordered sequence of frame statistics, and keeps detected
//! transitions editable on a timeline.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cutsync::frames::FrameLoader;
//! use cutsync::transitions::TransitionDetector;
//!
//! # fn main() -> anyhow::Result<()> {
//! let loaded = FrameLoader::default().load_directory("frames/", None)?;
//!
//! // Seeded so the randomized classification branches are reproducible
//! let transitions = TransitionDetector::new().detect_seeded(&loaded.frames, loaded.duration, 42);
//! for t in &transitions {
//!     println!("{:.2}s {} ({:.0}%)", t.timestamp, t.kind, t.confidence * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod timeline;
pub mod types;

pub use detector::{deduplicate, FrameDiff, Thresholds, TransitionDetector};
pub use timeline::{TimelineSegment, TransitionTimeline};
pub use types::{timeline_order, Transition, TransitionType};
