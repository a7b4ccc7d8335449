//! Construction of pixel buffers from raw decoder output.
//!
//! Decoders hand over flat, row-major sample vectors. These helpers check the
//! declared dimensions against the sample count before anything else runs.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::{ProcessError, Result};

/// Build an RGBA image from 4-channel, row-major samples.
pub fn rgba_from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<RgbaImage> {
    let expected = checked_len(width, height, 4)?;
    let actual = samples.len();
    // `from_raw` also accepts oversized buffers; only an exact match is valid.
    let img = (actual == expected)
        .then(|| RgbaImage::from_raw(width, height, samples))
        .flatten()
        .ok_or(ProcessError::InvalidInput { expected, actual })?;

    debug!(width, height, "Accepted RGBA pixel buffer");
    Ok(img)
}

/// Build an RGBA image from 3-channel, row-major samples.
///
/// Every pixel is widened to fully opaque RGBA.
pub fn rgb_from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<RgbaImage> {
    let expected = checked_len(width, height, 3)?;
    if samples.len() != expected {
        return Err(ProcessError::InvalidInput {
            expected,
            actual: samples.len(),
        });
    }

    debug!(width, height, "Accepted RGB pixel buffer");
    let mut img = RgbaImage::new(width, height);
    for (pixel, rgb) in img.pixels_mut().zip(samples.chunks_exact(3)) {
        *pixel = Rgba([rgb[0], rgb[1], rgb[2], 255]);
    }
    Ok(img)
}

fn checked_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ProcessError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ProcessError::InvalidDimension { width, height })
}
