//! ESC/POS 24-dot bit-image encoder.
//!
//! Turns a decoded RGBA image into the byte stream a thermal or dot-matrix
//! printer expects in `ESC *` double-density mode: content-aware crop, scale to
//! the device dot width, threshold, then pack into 24-row bands.

pub mod bit_image;
pub mod commands;
pub mod profile;


use image::{DynamicImage, RgbaImage};
use image_processor::{ProcessError, crop_to_content, rasterize};
use tracing::debug;

// Re-exports for convenience
pub use bit_image::{band_count, encode_bitmap, encoded_len};
pub use image_processor::DotBitmap;
pub use profile::{DeviceProfile, ResizeFilter};

/// Errors that can occur while building a bit-image stream.
#[derive(Debug, thiserror::Error)]
pub enum EscPosError {
    #[error(transparent)]
    Image(#[from] ProcessError),

    #[error("Bitmap width {0} does not fit the 16-bit column count")]
    WidthOutOfRange(u32),

    #[error("Invalid device profile: {0}")]
    InvalidProfile(String),
}

/// Result type alias for escpos-raster operations.
pub type Result<T> = std::result::Result<T, EscPosError>;

/// Convert an RGBA image into a complete bit-image command stream.
///
/// Every check runs before encoding starts, so an error never leaves a
/// partial stream behind.
pub fn encode_image(img: &RgbaImage, profile: &DeviceProfile) -> Result<Vec<u8>> {
    profile.validate()?;

    let (width, height) = img.dimensions();
    debug!(width, height, target_width = profile.target_width, "Encoding image");

    let cropped = crop_to_content(
        img,
        profile.white_tolerance,
        profile.margin,
        profile.empty_region_policy(),
    )?;
    let bitmap = rasterize(
        &cropped,
        profile.target_width,
        profile.threshold,
        profile.filter.into(),
    )?;
    encode_bitmap(&bitmap)
}

/// Same as [`encode_image`] for any decoded image; converts to RGBA first.
pub fn encode_dynamic_image(img: &DynamicImage, profile: &DeviceProfile) -> Result<Vec<u8>> {
    encode_image(&img.to_rgba8(), profile)
}
