//! Wrap a flat pattern image onto the waving region of a flag photograph.
//!
//! The pipeline is linear: region mask → pattern fit → lighting → composite.
//! [`FlagTemplate`] holds the once-computed pieces for a given photograph.

/// Shared grid types (polygon, mask, light map, frame buffer).
pub mod types;
/// Error taxonomy for the pipeline and its collaborators.
pub mod error;
/// Named constants and the JSON flag profile.
pub mod config;
/// Polygon to binary region mask.
pub mod mask;
/// Pattern stretching and canvas placement.
pub mod fit;
/// Luminance-derived shading.
pub mod lighting;
/// Mask-guided blending.
pub mod composite;
/// Once-built template and per-request render.
pub mod pipeline;
/// Pattern decoding, base loading, result encoding.
pub mod codec;
/// Result preview window.
pub mod view;

use anyhow::Result;
use log::LevelFilter;

pub use config::{FlagProfile, ResizeQuality};
pub use error::Error;
pub use pipeline::FlagTemplate;
pub use types::{BoundingBox, LightMap, Mask, Polygon};

/// Initialize logging once.
///
/// Respects `RUST_LOG` when set, otherwise uses `default_filter`.
pub fn init_logging(default_filter: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    );
    if builder.try_init().is_err() {
        // Logger already initialized; nothing to do.
    }
    Ok(())
}
