//! # Frame Statistics Module
//!
//! Reduces sampled video frames to compact visual statistics: mean
//! brightness, per-channel averages, a raster-order edge measure, and a
//! 16-band color histogram per channel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cutsync::frames::{FrameLoader, FrameStatsAnalyzer};
//!
//! # fn main() -> anyhow::Result<()> {
//! // Statistics for one raw RGBA buffer
//! let pixels = vec![128u8; 64 * 48 * 4];
//! let stats = FrameStatsAnalyzer::new().analyze(&pixels, 64, 48, 0.0)?;
//! println!("Brightness: {:.1}", stats.avg_brightness);
//!
//! // Or a whole directory of extracted frames
//! let loaded = FrameLoader::default().load_directory("frames/", Some(12.0))?;
//! println!("{} frames analyzed", loaded.frames.len());
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod loader;
pub mod types;

pub use analyzer::FrameStatsAnalyzer;
pub use loader::{FrameLoader, SamplingPlan};
pub use types::{Channel, ColorHistogram, FrameStats, LoadedFrames, HISTOGRAM_BUCKETS};
