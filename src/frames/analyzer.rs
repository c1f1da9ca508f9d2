use image::RgbaImage;

use crate::error::FrameError;
use crate::frames::types::{ColorHistogram, FrameStats};

/// Bytes per RGBA pixel
const CHANNELS: usize = 4;

/// Reduces a raw RGBA pixel buffer to a [`FrameStats`] record
///
/// The analysis is a single linear pass. Edge strength compares each pixel
/// with the next one in memory, so the last pixel of a row is compared with
/// the first pixel of the following row. The last pixel of the frame has no
/// neighbour and contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStatsAnalyzer;

impl FrameStatsAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Compute statistics for an interleaved RGBA buffer
    ///
    /// # Arguments
    ///
    /// * `pixels` - Row-major RGBA bytes, `width * height * 4` long
    /// * `width`, `height` - Frame dimensions in pixels
    /// * `timestamp` - Sample time in seconds, copied into the result
    pub fn analyze(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        timestamp: f64,
    ) -> Result<FrameStats, FrameError> {
        if pixels.is_empty() || width == 0 || height == 0 {
            return Err(FrameError::NoPixelData);
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| FrameError::InvalidArgument {
                details: format!("frame dimensions {}x{} overflow", width, height),
            })?;

        if pixels.len() != expected {
            return Err(FrameError::InvalidArgument {
                details: format!(
                    "pixel buffer has {} bytes, expected {} for {}x{} RGBA",
                    pixels.len(), expected, width, height
                ),
            });
        }

        let mut sum_r = 0u64;
        let mut sum_g = 0u64;
        let mut sum_b = 0u64;
        let mut edge_sum = 0u64;
        let mut histogram = ColorHistogram::new();

        let mut iter = pixels.chunks_exact(CHANNELS).peekable();
        while let Some(px) = iter.next() {
            let (r, g, b) = (px[0], px[1], px[2]);

            sum_r += r as u64;
            sum_g += g as u64;
            sum_b += b as u64;
            histogram.record(r, g, b);

            if let Some(next) = iter.peek() {
                edge_sum += r.abs_diff(next[0]) as u64
                    + g.abs_diff(next[1]) as u64
                    + b.abs_diff(next[2]) as u64;
            }
        }

        let count = (pixels.len() / CHANNELS) as f64;
        let avg_r = sum_r as f64 / count;
        let avg_g = sum_g as f64 / count;
        let avg_b = sum_b as f64 / count;

        Ok(FrameStats {
            timestamp,
            avg_brightness: (sum_r + sum_g + sum_b) as f64 / 3.0 / count,
            avg_r,
            avg_g,
            avg_b,
            edge_strength: edge_sum as f64 / 3.0 / count,
            color_histogram: histogram,
        })
    }

    /// Compute statistics for a decoded RGBA image
    pub fn analyze_image(&self, image: &RgbaImage, timestamp: f64) -> Result<FrameStats, FrameError> {
        self.analyze(image.as_raw(), image.width(), image.height(), timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::types::Channel;
    use image::{ImageBuffer, Rgba};

    fn solid(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        color.iter().copied().cycle().take((width * height * 4) as usize).collect()
    }

    #[test]
    fn test_solid_frame_statistics() {
        let pixels = solid(4, 3, [30, 60, 90, 255]);
        let stats = FrameStatsAnalyzer::new().analyze(&pixels, 4, 3, 1.5).unwrap();

        assert_eq!(stats.timestamp, 1.5);
        assert!((stats.avg_r - 30.0).abs() < 1e-9);
        assert!((stats.avg_g - 60.0).abs() < 1e-9);
        assert!((stats.avg_b - 90.0).abs() < 1e-9);
        assert!((stats.avg_brightness - 60.0).abs() < 1e-9);
        assert_eq!(stats.edge_strength, 0.0);
        assert_eq!(stats.color_histogram.r[1], 12);
        assert_eq!(stats.color_histogram.g[3], 12);
        assert_eq!(stats.color_histogram.b[5], 12);
    }

    #[test]
    fn test_histogram_conservation() {
        let pixels: Vec<u8> = (0..(7 * 5 * 4)).map(|i| (i * 37 % 256) as u8).collect();
        let stats = FrameStatsAnalyzer::new().analyze(&pixels, 7, 5, 0.0).unwrap();

        for channel in [Channel::Red, Channel::Green, Channel::Blue] {
            assert_eq!(stats.color_histogram.total(channel), 35);
        }
        assert_eq!(stats.pixel_count(), 35);
    }

    #[test]
    fn test_edge_strength_uses_raster_neighbour() {
        // 2x1: black then white, one comparison of (255*3)/3 spread over 2 pixels
        let pixels = vec![0, 0, 0, 255, 255, 255, 255, 255];
        let stats = FrameStatsAnalyzer::new().analyze(&pixels, 2, 1, 0.0).unwrap();
        assert!((stats.edge_strength - 127.5).abs() < 1e-9);

        // 1x2: the same pixels stacked vertically still compare in memory order
        let stacked = FrameStatsAnalyzer::new().analyze(&pixels, 1, 2, 0.0).unwrap();
        assert_eq!(stats.edge_strength, stacked.edge_strength);
    }

    #[test]
    fn test_empty_buffer_is_no_pixel_data() {
        let result = FrameStatsAnalyzer::new().analyze(&[], 0, 0, 0.0);
        assert!(matches!(result, Err(FrameError::NoPixelData)));
    }

    #[test]
    fn test_mismatched_length_is_invalid_argument() {
        let pixels = solid(2, 2, [1, 2, 3, 4]);
        let result = FrameStatsAnalyzer::new().analyze(&pixels, 3, 2, 0.0);
        assert!(matches!(result, Err(FrameError::InvalidArgument { .. })));
    }

    #[test]
    fn test_analyze_image_matches_raw() {
        let image: RgbaImage = ImageBuffer::from_fn(3, 3, |x, y| Rgba([(x * 80) as u8, (y * 80) as u8, 10, 255]));
        let analyzer = FrameStatsAnalyzer::new();

        let from_image = analyzer.analyze_image(&image, 2.0).unwrap();
        let from_raw = analyzer.analyze(image.as_raw(), 3, 3, 2.0).unwrap();
        assert_eq!(from_image, from_raw);
    }
}
