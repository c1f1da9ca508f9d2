use serde::{Deserialize, Serialize};

/// Number of intensity bands per channel histogram
pub const HISTOGRAM_BUCKETS: usize = 16;

/// Width of one histogram band in channel intensity units
pub const BUCKET_WIDTH: u8 = 16;

/// Per-channel 16-band color histogram
///
/// Each bucket counts the pixels whose channel value falls in a 16-wide
/// intensity band, so every channel's buckets sum to the frame's pixel count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorHistogram {
    pub r: [u32; HISTOGRAM_BUCKETS],
    pub g: [u32; HISTOGRAM_BUCKETS],
    pub b: [u32; HISTOGRAM_BUCKETS],
}

/// Color channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl ColorHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one pixel
    pub fn record(&mut self, r: u8, g: u8, b: u8) {
        self.r[(r / BUCKET_WIDTH) as usize] += 1;
        self.g[(g / BUCKET_WIDTH) as usize] += 1;
        self.b[(b / BUCKET_WIDTH) as usize] += 1;
    }

    /// Buckets for one channel
    pub fn channel(&self, channel: Channel) -> &[u32; HISTOGRAM_BUCKETS] {
        match channel {
            Channel::Red => &self.r,
            Channel::Green => &self.g,
            Channel::Blue => &self.b,
        }
    }

    /// Sum of one channel's buckets
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().map(|&count| count as u64).sum()
    }

    /// Sum of absolute bucket differences across all 48 buckets
    pub fn difference(&self, other: &ColorHistogram) -> u64 {
        [Channel::Red, Channel::Green, Channel::Blue]
            .iter()
            .flat_map(|&channel| self.channel(channel).iter().zip(other.channel(channel).iter()))
            .map(|(&a, &b)| a.abs_diff(b) as u64)
            .sum()
    }
}

/// Compact visual statistics for one sampled frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStats {
    /// Sample time in seconds
    pub timestamp: f64,

    /// Mean of (R+G+B)/3 over all pixels
    pub avg_brightness: f64,

    pub avg_r: f64,
    pub avg_g: f64,
    pub avg_b: f64,

    /// Mean absolute color difference to the next pixel in raster order
    pub edge_strength: f64,

    pub color_histogram: ColorHistogram,
}

impl FrameStats {
    /// Whether this frame carries usable brightness data.
    ///
    /// A zero mean brightness is treated the same as a missing value.
    pub fn has_brightness(&self) -> bool {
        self.avg_brightness.is_finite() && self.avg_brightness != 0.0
    }

    /// Number of pixels the statistics were computed over
    pub fn pixel_count(&self) -> u64 {
        self.color_histogram.total(Channel::Red)
    }
}

/// Frames produced by a loader along with bookkeeping about the run
#[derive(Debug, Clone)]
pub struct LoadedFrames {
    /// Statistics for every frame that could be analyzed, in time order
    pub frames: Vec<FrameStats>,

    /// Duration the sampling plan covered (seconds)
    pub duration: f64,

    /// Frames dropped because their pixels could not be read
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_record_and_totals() {
        let mut hist = ColorHistogram::new();
        hist.record(0, 15, 16);
        hist.record(255, 128, 31);

        assert_eq!(hist.r[0], 1);
        assert_eq!(hist.r[15], 1);
        assert_eq!(hist.g[0], 1);
        assert_eq!(hist.g[8], 1);
        assert_eq!(hist.b[1], 2);
        assert_eq!(hist.total(Channel::Green), 2);
    }

    #[test]
    fn test_histogram_difference() {
        let mut a = ColorHistogram::new();
        let mut b = ColorHistogram::new();
        a.record(0, 0, 0);
        b.record(255, 0, 0);

        // red moves between two buckets, green and blue match
        assert_eq!(a.difference(&b), 2);
        assert_eq!(a.difference(&a), 0);
    }

    #[test]
    fn test_zero_brightness_is_missing() {
        let stats = FrameStats {
            timestamp: 0.0,
            avg_brightness: 0.0,
            avg_r: 0.0,
            avg_g: 0.0,
            avg_b: 0.0,
            edge_strength: 0.0,
            color_histogram: ColorHistogram::new(),
        };
        assert!(!stats.has_brightness());

        let lit = FrameStats { avg_brightness: 12.5, ..stats };
        assert!(lit.has_brightness());
    }
}
