//! Named constants and the swappable flag profile.
//!
//! The blend weights and light range were tuned against one photograph and are
//! fixed. The profile (base image, region polygon, resampling, JPEG quality)
//! can be replaced from JSON so a different photograph can be targeted without
//! touching the pipeline.

use crate::types::Polygon;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

/// Weight of the shaded pattern inside the region.
pub const PATTERN_WEIGHT: f32 = 0.8;
/// Weight of the photographed flag texture inside the region.
pub const FLAG_WEIGHT: f32 = 0.2;

/// Darkest base pixel maps to this multiplier.
pub const LIGHT_MIN: f32 = 0.4;
/// Brightest base pixel maps to this multiplier.
pub const LIGHT_MAX: f32 = 1.0;
/// Multiplier used everywhere when the base image has no intensity range.
pub const LIGHT_UNIFORM: f32 = 1.0;

/// ITU-R BT.601 luma weights (R, G, B).
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

pub const DEFAULT_BASE_IMAGE: &str = "Flag.jpg";
pub const DEFAULT_OUTPUT: &str = "output.jpg";
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Outline of the waving part of the reference flag photograph.
pub const REFERENCE_POLYGON: [(i32, i32); 35] = [
    (22, 25), (37, 25), (55, 29), (77, 31), (100, 37), (121, 44), (146, 44),
    (169, 43), (193, 43), (206, 36), (213, 53), (215, 65), (206, 76), (207, 87),
    (213, 96), (205, 111), (214, 129), (214, 146), (209, 165), (206, 180),
    (186, 176), (165, 180), (141, 172), (115, 166), (96, 156), (75, 153),
    (60, 152), (50, 158), (37, 161), (29, 162), (25, 148), (25, 130), (27, 103),
    (27, 69), (24, 48),
];

pub fn reference_polygon() -> Polygon {
    Polygon::new(REFERENCE_POLYGON.to_vec())
}

/// Resampling used when stretching the pattern into the region.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizeQuality {
    /// Bilinear (Triangle filter).
    #[default]
    Quality,
    /// Nearest neighbour.
    Speed,
}

impl ResizeQuality {
    pub fn filter(self) -> FilterType {
        match self {
            ResizeQuality::Quality => FilterType::Triangle,
            ResizeQuality::Speed => FilterType::Nearest,
        }
    }
}

impl fmt::Display for ResizeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResizeQuality::Quality => "quality",
                ResizeQuality::Speed => "speed",
            }
        )
    }
}

impl FromStr for ResizeQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quality" | "bilinear" | "triangle" => Ok(ResizeQuality::Quality),
            "speed" | "nearest" => Ok(ResizeQuality::Speed),
            other => Err(format!(
                "unknown resize quality '{other}' (expected 'quality' or 'speed')"
            )),
        }
    }
}

/// Everything that ties the pipeline to one particular photograph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlagProfile {
    pub base_image: PathBuf,
    pub polygon: Polygon,
    pub resize_quality: ResizeQuality,
    pub jpeg_quality: u8,
}

impl Default for FlagProfile {
    fn default() -> Self {
        Self {
            base_image: PathBuf::from(DEFAULT_BASE_IMAGE),
            polygon: reference_polygon(),
            resize_quality: ResizeQuality::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl FlagProfile {
    /// Return a copy with values forced into their valid ranges.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.jpeg_quality = out.jpeg_quality.clamp(1, 100);
        out
    }

    /// Load a profile from pretty or compact JSON; absent fields keep their defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile file {}", path.display()))?;
        let profile: FlagProfile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse profile JSON at {}", path.display()))?;
        Ok(profile.sanitized())
    }

    /// Serialize the profile to disk in pretty-printed JSON, overwriting any existing file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload =
            serde_json::to_string_pretty(self).context("failed to serialize profile JSON")?;
        fs::write(path, payload)
            .with_context(|| format!("failed to write profile file {}", path.display()))?;
        Ok(())
    }
}
