//! Image processing for 24-dot bit-image printing.
//!
//! Finds the printable region of an image, scales it to the device dot width,
//! and thresholds it into a monochrome dot bitmap.

pub mod buffer;
pub mod dots;
pub mod region;
pub mod resize;

// Re-exports for convenience
pub use buffer::{rgb_from_raw, rgba_from_raw};
pub use dots::{DotBitmap, luminance, rasterize, threshold_dots};
pub use region::{EmptyRegionPolicy, Region, crop_to_content, detect_content_region};
pub use resize::resize_to_width;

/// Luminance below this value prints a dot.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Padding in pixels added around detected content.
pub const DEFAULT_MARGIN: u32 = 10;

/// Any RGB channel below this value counts as content.
pub const DEFAULT_WHITE_TOLERANCE: u8 = 250;

/// Errors raised while preparing an image for printing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Image has no content darker than the white tolerance")]
    EmptyRegion,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
}

/// Result type alias for image-processor operations.
pub type Result<T> = std::result::Result<T, ProcessError>;
