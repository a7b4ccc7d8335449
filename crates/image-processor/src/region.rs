//! Content-aware cropping.
//!
//! Locates the bounding box of every pixel that is not near-white, pads it
//! with a margin, and clamps the result to the image bounds.

use image::{Rgba, RgbaImage, imageops};
use tracing::debug;

use crate::{ProcessError, Result};

/// Axis-aligned crop rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// What to do when an image has no content at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyRegionPolicy {
    /// Reject the image with [`ProcessError::EmptyRegion`].
    #[default]
    Fail,
    /// Print the whole image uncropped.
    UseFullImage,
}

/// Whether a pixel counts as printable content.
///
/// Alpha is ignored; only the color channels are compared.
pub fn is_content_pixel(pixel: &Rgba<u8>, tolerance: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r < tolerance || g < tolerance || b < tolerance
}

/// Find the margin-padded bounding box of all content pixels.
///
/// Returns `None` for an image with no content pixel.
pub fn detect_content_region(img: &RgbaImage, tolerance: u8, margin: u32) -> Option<Region> {
    let (width, height) = img.dimensions();

    let mut left = width;
    let mut right = 0;
    let mut top = height;
    let mut bottom = 0;

    for (x, y, pixel) in img.enumerate_pixels() {
        if is_content_pixel(pixel, tolerance) {
            left = left.min(x);
            right = right.max(x);
            top = top.min(y);
            bottom = bottom.max(y);
        }
    }

    if left > right || top > bottom {
        debug!(width, height, "No content pixels found");
        return None;
    }

    // Right and bottom are exclusive after padding, but never short of the
    // last content column or row.
    let x = left.saturating_sub(margin);
    let y = top.saturating_sub(margin);
    let right = right.saturating_add(margin).min(width).max(right + 1);
    let bottom = bottom.saturating_add(margin).min(height).max(bottom + 1);

    let region = Region {
        x,
        y,
        width: right - x,
        height: bottom - y,
    };
    debug!(
        x = region.x,
        y = region.y,
        width = region.width,
        height = region.height,
        "Detected content region"
    );
    Some(region)
}

/// Crop an image to its content region.
///
/// The result is an independent copy; the source is never modified.
pub fn crop_to_content(
    img: &RgbaImage,
    tolerance: u8,
    margin: u32,
    policy: EmptyRegionPolicy,
) -> Result<RgbaImage> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessError::InvalidDimension { width, height });
    }

    match detect_content_region(img, tolerance, margin) {
        Some(r) => Ok(imageops::crop_imm(img, r.x, r.y, r.width, r.height).to_image()),
        None => match policy {
            EmptyRegionPolicy::Fail => Err(ProcessError::EmptyRegion),
            EmptyRegionPolicy::UseFullImage => {
                debug!(width, height, "Falling back to the full image");
                Ok(img.clone())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn white_canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, WHITE)
    }

    #[test]
    fn test_single_pixel_gets_margin() {
        let mut img = white_canvas(200, 200);
        img.put_pixel(50, 50, BLACK);

        let region = detect_content_region(&img, 250, 10).unwrap();
        assert_eq!(
            region,
            Region {
                x: 40,
                y: 40,
                width: 20,
                height: 20
            }
        );
    }

    #[test]
    fn test_margin_clamps_at_edges() {
        let mut img = white_canvas(30, 20);
        img.put_pixel(2, 1, BLACK);
        img.put_pixel(28, 18, BLACK);

        let region = detect_content_region(&img, 250, 10).unwrap();
        assert_eq!(region.x, 0);
        assert_eq!(region.y, 0);
        assert_eq!(region.right(), 30);
        assert_eq!(region.bottom(), 20);
    }

    #[test]
    fn test_zero_margin_keeps_corner_pixel() {
        let mut img = white_canvas(8, 8);
        img.put_pixel(7, 7, BLACK);

        let region = detect_content_region(&img, 250, 0).unwrap();
        assert_eq!(
            region,
            Region {
                x: 7,
                y: 7,
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn test_zero_margin_keeps_whole_run() {
        let mut img = white_canvas(20, 20);
        for x in 5..=7 {
            img.put_pixel(x, 10, BLACK);
        }

        let region = detect_content_region(&img, 250, 0).unwrap();
        assert_eq!(
            region,
            Region {
                x: 5,
                y: 10,
                width: 3,
                height: 1
            }
        );

        let cropped = crop_to_content(&img, 250, 0, EmptyRegionPolicy::Fail).unwrap();
        assert_eq!(cropped.dimensions(), (3, 1));
        assert!(cropped.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_near_white_is_not_content() {
        let mut img = white_canvas(10, 10);
        img.put_pixel(3, 3, Rgba([250, 250, 250, 255]));
        assert!(detect_content_region(&img, 250, 10).is_none());

        img.put_pixel(3, 3, Rgba([255, 249, 255, 255]));
        assert!(detect_content_region(&img, 250, 10).is_some());
    }

    #[test]
    fn test_alpha_is_ignored() {
        let mut img = white_canvas(4, 4);
        img.put_pixel(1, 1, Rgba([255, 255, 255, 0]));
        assert!(detect_content_region(&img, 250, 1).is_none());
    }

    #[test]
    fn test_all_white_fails_by_default() {
        let img = white_canvas(16, 16);
        let err = crop_to_content(&img, 250, 10, EmptyRegionPolicy::Fail).unwrap_err();
        assert_eq!(err, ProcessError::EmptyRegion);
    }

    #[test]
    fn test_all_white_falls_back_to_full_image() {
        let img = white_canvas(16, 9);
        let cropped = crop_to_content(&img, 250, 10, EmptyRegionPolicy::UseFullImage).unwrap();
        assert_eq!(cropped.dimensions(), (16, 9));
    }

    #[test]
    fn test_crop_copies_content() {
        let mut img = white_canvas(100, 100);
        img.put_pixel(60, 30, BLACK);

        let cropped = crop_to_content(&img, 250, 5, EmptyRegionPolicy::Fail).unwrap();
        assert_eq!(cropped.dimensions(), (10, 10));
        assert_eq!(*cropped.get_pixel(5, 5), BLACK);
        assert_eq!(*cropped.get_pixel(0, 0), WHITE);
        // Source is untouched.
        assert_eq!(*img.get_pixel(60, 30), BLACK);
    }
}
