//! Device calibration profile.
//!
//! Target dot width, threshold and crop parameters differ between printer
//! models. Defaults match the 505-dot reference device.

use image::imageops::FilterType;
use image_processor::{
    DEFAULT_MARGIN, DEFAULT_THRESHOLD, DEFAULT_WHITE_TOLERANCE, EmptyRegionPolicy,
};
use serde::{Deserialize, Serialize};

use crate::{EscPosError, Result};

/// Printable width of the reference device, in dots.
pub const DEFAULT_TARGET_WIDTH: u32 = 505;

/// Interpolation used when scaling to the target width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Per-printer conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Width of the printed image in dots.
    pub target_width: u32,

    /// Luminance below this value prints a dot.
    pub threshold: u8,

    /// Padding kept around detected content, in source pixels.
    pub margin: u32,

    /// Any RGB channel below this value counts as content when cropping.
    pub white_tolerance: u8,

    pub filter: ResizeFilter,

    /// Print the uncropped image when no content is found instead of failing.
    pub fallback_to_full_image: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
            white_tolerance: DEFAULT_WHITE_TOLERANCE,
            filter: ResizeFilter::default(),
            fallback_to_full_image: false,
        }
    }
}

impl DeviceProfile {
    /// Reference device profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set target width in dots.
    pub fn with_target_width(mut self, val: u32) -> Self {
        self.target_width = val;
        self
    }

    /// Builder: set luminance threshold.
    pub fn with_threshold(mut self, val: u8) -> Self {
        self.threshold = val;
        self
    }

    /// Builder: set crop margin.
    pub fn with_margin(mut self, val: u32) -> Self {
        self.margin = val;
        self
    }

    /// Builder: set white tolerance used by content detection.
    pub fn with_white_tolerance(mut self, val: u8) -> Self {
        self.white_tolerance = val;
        self
    }

    /// Builder: set resize filter.
    pub fn with_filter(mut self, val: ResizeFilter) -> Self {
        self.filter = val;
        self
    }

    /// Builder: set empty-image fallback.
    pub fn with_fallback_to_full_image(mut self, val: bool) -> Self {
        self.fallback_to_full_image = val;
        self
    }

    pub fn empty_region_policy(&self) -> EmptyRegionPolicy {
        if self.fallback_to_full_image {
            EmptyRegionPolicy::UseFullImage
        } else {
            EmptyRegionPolicy::Fail
        }
    }

    /// Check that the profile can produce a valid command stream.
    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 || self.target_width > u32::from(u16::MAX) {
            return Err(EscPosError::InvalidProfile(format!(
                "target_width must be between 1 and {}, got {}",
                u16::MAX,
                self.target_width
            )));
        }
        if self.threshold == 0 {
            return Err(EscPosError::InvalidProfile(
                "threshold 0 can never print a dot".into(),
            ));
        }
        if self.white_tolerance == 0 {
            return Err(EscPosError::InvalidProfile(
                "white_tolerance 0 can never detect content".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = DeviceProfile::default();
        assert_eq!(profile.target_width, 505);
        assert_eq!(profile.threshold, 127);
        assert_eq!(profile.margin, 10);
        assert_eq!(profile.white_tolerance, 250);
        assert_eq!(profile.filter, ResizeFilter::Bilinear);
        assert_eq!(profile.empty_region_policy(), EmptyRegionPolicy::Fail);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let profile = DeviceProfile::new()
            .with_target_width(384)
            .with_threshold(100)
            .with_margin(0)
            .with_white_tolerance(200)
            .with_filter(ResizeFilter::Lanczos3)
            .with_fallback_to_full_image(true);

        assert_eq!(profile.target_width, 384);
        assert_eq!(profile.threshold, 100);
        assert_eq!(profile.margin, 0);
        assert_eq!(profile.white_tolerance, 200);
        assert_eq!(profile.filter, ResizeFilter::Lanczos3);
        assert_eq!(profile.empty_region_policy(), EmptyRegionPolicy::UseFullImage);
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let err = DeviceProfile::new().with_target_width(0).validate().unwrap_err();
        assert!(matches!(err, EscPosError::InvalidProfile(_)));
    }

    #[test]
    fn test_validate_rejects_width_over_u16() {
        let profile = DeviceProfile::new().with_target_width(70_000);
        assert!(profile.validate().is_err());
        assert!(DeviceProfile::new().with_target_width(65_535).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        assert!(DeviceProfile::new().with_threshold(0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let profile: DeviceProfile =
            serde_json::from_str(r#"{"target_width": 576, "filter": "lanczos3"}"#).unwrap();
        assert_eq!(profile.target_width, 576);
        assert_eq!(profile.filter, ResizeFilter::Lanczos3);
        assert_eq!(profile.threshold, 127);
        assert!(!profile.fallback_to_full_image);
    }

    #[test]
    fn test_filter_mapping() {
        assert_eq!(FilterType::from(ResizeFilter::Bilinear), FilterType::Triangle);
        assert_eq!(FilterType::from(ResizeFilter::Nearest), FilterType::Nearest);
    }
}
