//! Render target: a 3-channel floating point raster.

use std::path::Path;

use crate::Color;

/// The output image.
///
/// Pixels stay in linear radiance until saved. During rendering each
/// pixel is written exactly once, by the worker thread owning the strip
/// that contains it.
pub struct RenderTarget {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl RenderTarget {
    /// Create a target filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Save the image; the format follows the path's extension.
    ///
    /// `.exr` stores the raw float radiance; every other format gets a
    /// gamma-corrected 8-bit conversion.
    pub fn save(&self, path: &Path) -> Result<(), image::ImageError> {
        let is_exr = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("exr"));

        if is_exr {
            let mut data = Vec::with_capacity(self.pixels.len() * 3);
            for p in &self.pixels {
                data.extend_from_slice(&p.to_array());
            }
            let float_image = image::Rgb32FImage::from_raw(self.width, self.height, data)
                .expect("pixel buffer matches image dimensions");
            image::DynamicImage::ImageRgb32F(float_image).save(path)
        } else {
            let mut data = Vec::with_capacity(self.pixels.len() * 3);
            for p in &self.pixels {
                data.push((255.0 * linear_to_gamma(p.x).clamp(0.0, 1.0)) as u8);
                data.push((255.0 * linear_to_gamma(p.y).clamp(0.0, 1.0)) as u8);
                data.push((255.0 * linear_to_gamma(p.z).clamp(0.0, 1.0)) as u8);
            }
            let byte_image = image::RgbImage::from_raw(self.width, self.height, data)
                .expect("pixel buffer matches image dimensions");
            byte_image.save(path)
        }
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}
