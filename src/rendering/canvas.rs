//! Growable pixel buffer

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use sha2::{Digest, Sha256};

use crate::{Color, Error, Result};

/// An RGB pixel buffer whose width is fixed and whose height only grows.
///
/// Growth copies the existing pixels to the top-left of a taller buffer
/// filled with the background color, so drawing code never needs to know
/// whether a reallocation happened.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    background: Color,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        Ok(Self {
            image: Self::allocate(width, height, background)?,
            background,
        })
    }

    fn allocate(width: u32, height: u32, background: Color) -> Result<RgbImage> {
        if width == 0 || height == 0 {
            return Err(Error::Canvas(format!("zero-sized canvas {}x{}", width, height)));
        }
        let bytes = u64::from(width) * u64::from(height) * 3;
        if bytes > isize::MAX as u64 {
            return Err(Error::Canvas(format!("canvas {}x{} is too large", width, height)));
        }
        Ok(RgbImage::from_pixel(width, height, Rgb(background.0)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(Color(self.image.get_pixel(x, y).0))
        } else {
            None
        }
    }

    /// Grow to at least `at_least` rows. Returns whether a reallocation happened.
    pub fn ensure_height(&mut self, at_least: u32) -> Result<bool> {
        if at_least <= self.height() {
            return Ok(false);
        }
        let mut grown = Self::allocate(self.width(), at_least, self.background)?;
        image::imageops::replace(&mut grown, &self.image, 0, 0);
        log::debug!("canvas grown from {} to {} rows", self.height(), at_least);
        self.image = grown;
        Ok(true)
    }

    /// Blend `color` over the pixel at (x, y) with `coverage` in 0..=255.
    /// Coordinates outside the canvas are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 || coverage == 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        if coverage == u8::MAX {
            px.0 = color.0;
            return;
        }
        let a = u32::from(coverage);
        for (dst, src) in px.0.iter_mut().zip(color.0) {
            let mixed = (u32::from(src) * a + u32::from(*dst) * (255 - a) + 127) / 255;
            *dst = mixed as u8;
        }
    }

    /// Fill an axis-aligned block, clipped to the canvas.
    pub fn fill_block(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.blend(x + dx, y + dy, color, u8::MAX);
            }
        }
    }

    /// Fill a disc centered at (cx, cy), with anti-aliased edges.
    pub fn fill_disc(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let r = radius as f32;
        let reach = radius as i32 + 1;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                let coverage = (r + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(cx + dx, cy + dy, color, (coverage * 255.0).round() as u8);
                }
            }
        }
    }

    /// SHA-256 of the raw pixels plus dimensions, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width().to_be_bytes());
        hasher.update(self.height().to_be_bytes());
        hasher.update(self.image.as_raw());
        hex::encode(hasher.finalize())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}
