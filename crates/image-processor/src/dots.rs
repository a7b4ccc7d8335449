//! Luminance thresholding into a monochrome dot bitmap.

use image::RgbaImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::resize::resize_to_width;
use crate::{ProcessError, Result};

/// Immutable monochrome bitmap, one flag per dot, row-major.
///
/// `true` means a dot is printed (black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotBitmap {
    width: u32,
    height: u32,
    dots: Vec<bool>,
}

impl DotBitmap {
    /// Wrap a row-major dot vector.
    ///
    /// Fails if either dimension is zero or the length is not `width * height`.
    pub fn new(width: u32, height: u32, dots: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ProcessError::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if dots.len() != expected {
            return Err(ProcessError::InvalidInput {
                expected,
                actual: dots.len(),
            });
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dot at `(x, y)`; anything outside the bitmap reads as blank.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.dots[y as usize * self.width as usize + x as usize]
    }

    /// Number of printed dots.
    pub fn dot_count(&self) -> usize {
        self.dots.iter().filter(|&&d| d).count()
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.dots.chunks_exact(self.width as usize)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.dots
    }
}

/// Perceptual luminance, `0.30 R + 0.59 G + 0.11 B`, truncated.
///
/// Integer arithmetic keeps mid-gray exact (127, 127, 127 -> 127).
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 30 * u32::from(r) + 59 * u32::from(g) + 11 * u32::from(b);
    (weighted / 100) as u8
}

/// Threshold every pixel: a dot is set iff its luminance is below `threshold`.
pub fn threshold_dots(img: &RgbaImage, threshold: u8) -> Result<DotBitmap> {
    let (width, height) = img.dimensions();
    debug!(width, height, threshold, "Applying threshold conversion");

    let dots = img
        .pixels()
        .map(|p| luminance(p[0], p[1], p[2]) < threshold)
        .collect();

    DotBitmap::new(width, height, dots)
}

/// Scale to `target_width` dots and threshold into a [`DotBitmap`].
pub fn rasterize(
    img: &RgbaImage,
    target_width: u32,
    threshold: u8,
    filter: FilterType,
) -> Result<DotBitmap> {
    let scaled = resize_to_width(img, target_width, filter)?;
    let bitmap = threshold_dots(&scaled, threshold)?;
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        dots = bitmap.dot_count(),
        "Rasterized image"
    );
    Ok(bitmap)
}
