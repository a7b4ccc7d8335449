//! Scaling to the printer's dot width.
//!
//! The aspect ratio is preserved; only the width is fixed by the device.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::{ProcessError, Result};

/// Resize an image to a target width while maintaining aspect ratio.
///
/// Returns an unchanged copy if the image already matches the target width.
pub fn resize_to_width(img: &RgbaImage, width: u32, filter: FilterType) -> Result<RgbaImage> {
    let (orig_w, orig_h) = img.dimensions();

    if orig_w == 0 || orig_h == 0 {
        return Err(ProcessError::InvalidDimension {
            width: orig_w,
            height: orig_h,
        });
    }
    if width == 0 {
        return Err(ProcessError::InvalidDimension { width, height: orig_h });
    }

    if orig_w == width {
        debug!(width, "Image already at target width, skipping resize");
        return Ok(img.clone());
    }

    let ratio = f64::from(width) / f64::from(orig_w);
    let new_height = (f64::from(orig_h) * ratio).round() as u32;
    let new_height = new_height.max(1);

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height,
        ?filter,
        "Resizing image to target width"
    );

    Ok(imageops::resize(img, width, new_height, filter))
}
