//! Device profile resolution for the command line.
//!
//! Precedence, lowest first: built-in defaults, `--profile` JSON file,
//! `ESCPOS_*` environment variables, explicit flags.

use std::path::Path;

use anyhow::Context;
use escpos_raster::DeviceProfile;

use crate::Args;

/// Load a profile from a JSON file; missing keys keep their defaults.
pub fn load_profile_file(path: &Path) -> anyhow::Result<DeviceProfile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid profile {}", path.display()))
}

/// Apply `ESCPOS_*` overrides from the given lookup.
pub fn apply_env(
    mut profile: DeviceProfile,
    var: impl Fn(&str) -> Option<String>,
) -> DeviceProfile {
    if let Some(v) = var("ESCPOS_TARGET_WIDTH").and_then(|v| v.parse().ok()) {
        profile.target_width = v;
    }
    if let Some(v) = var("ESCPOS_THRESHOLD").and_then(|v| v.parse().ok()) {
        profile.threshold = v;
    }
    if let Some(v) = var("ESCPOS_MARGIN").and_then(|v| v.parse().ok()) {
        profile.margin = v;
    }
    if let Some(v) = var("ESCPOS_FULL_IMAGE_FALLBACK").and_then(|v| parse_flag(&v)) {
        profile.fallback_to_full_image = v;
    }
    profile
}

/// `true`/`false` or `1`/`0`; anything else is ignored.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        other => other.parse().ok(),
    }
}

/// Apply explicit command-line flags.
pub fn apply_args(mut profile: DeviceProfile, args: &Args) -> DeviceProfile {
    if let Some(v) = args.target_width {
        profile.target_width = v;
    }
    if let Some(v) = args.threshold {
        profile.threshold = v;
    }
    if let Some(v) = args.margin {
        profile.margin = v;
    }
    if args.full_image_fallback {
        profile.fallback_to_full_image = true;
    }
    profile
}

/// Resolve the effective profile for this run.
pub fn resolve(args: &Args) -> anyhow::Result<DeviceProfile> {
    let base = match &args.profile {
        Some(path) => load_profile_file(path)?,
        None => DeviceProfile::default(),
    };
    let profile = apply_env(base, |key| std::env::var(key).ok());
    let profile = apply_args(profile, args);
    profile.validate()?;
    Ok(profile)
}
