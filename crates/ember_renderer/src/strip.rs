//! Strip partitioning for the render scheduler.
//!
//! The image is split into vertical strips of near-equal width, one
//! per worker thread. The strips exactly tile the pixel domain: no
//! pixel is in two strips and none is left out, for any image width
//! and thread count.

use glam::Vec3;

use crate::recorder::PathLog;

/// A full-height column range of the output image.
#[derive(Debug, Clone, Copy)]
pub struct Strip {
    /// X coordinate of the strip's first column
    pub x0: u32,
    /// Width of the strip in pixels
    pub width: u32,
    /// Index of this strip (and of the worker that owns it)
    pub index: usize,
}

impl Strip {
    /// Get the total number of pixels in this strip.
    pub fn pixel_count(&self, height: u32) -> u32 {
        self.width * height
    }
}

/// Partition an image into vertical strips.
///
/// Widths differ by at most one pixel: the first `width % count`
/// strips take the extra column. At most one strip per image column,
/// so very narrow images get fewer strips than requested.
pub fn generate_strips(width: u32, count: usize) -> Vec<Strip> {
    let count = (count.max(1) as u32).min(width);
    let base = width / count;
    let extra = width % count;

    let mut strips = Vec::with_capacity(count as usize);
    let mut x0 = 0;
    for index in 0..count {
        let strip_width = base + u32::from(index < extra);
        strips.push(Strip {
            x0,
            width: strip_width,
            index: index as usize,
        });
        x0 += strip_width;
    }

    strips
}

/// One worker's output: its strip's pixels plus its path log.
pub struct StripResult {
    pub strip: Strip,
    /// Pixel colors in row-major order within the strip
    pub pixels: Vec<Vec3>,
    pub log: PathLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every pixel column is covered by exactly one strip.
    fn assert_exact_tiling(width: u32, count: usize) {
        let strips = generate_strips(width, count);
        let mut covered = vec![0u32; width as usize];

        for strip in &strips {
            for x in strip.x0..strip.x0 + strip.width {
                covered[x as usize] += 1;
            }
        }

        assert!(
            covered.iter().all(|&c| c == 1),
            "tiling broken for width={width} count={count}: {covered:?}"
        );
    }

    #[test]
    fn test_exact_tiling() {
        for (width, count) in [
            (640, 8),
            (641, 8),
            (7, 3),
            (64, 1),
            (1, 4),
            (3, 16),
            (1920, 12),
        ] {
            assert_exact_tiling(width, count);
        }
    }

    #[test]
    fn test_widths_near_equal() {
        let strips = generate_strips(100, 8);
        assert_eq!(strips.len(), 8);

        let min = strips.iter().map(|s| s.width).min().unwrap();
        let max = strips.iter().map(|s| s.width).max().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_narrow_image_caps_strip_count() {
        let strips = generate_strips(3, 16);
        assert_eq!(strips.len(), 3);
        assert!(strips.iter().all(|s| s.width == 1));
    }

    #[test]
    fn test_pixel_count() {
        let strips = generate_strips(10, 3);
        let total: u32 = strips.iter().map(|s| s.pixel_count(20)).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_indices_sequential() {
        let strips = generate_strips(64, 4);
        for (i, strip) in strips.iter().enumerate() {
            assert_eq!(strip.index, i);
        }
    }
}
