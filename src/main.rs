// What you GET:
// • The base flag photo is loaded once and its region/lighting prepared.
// • Your pattern (PNG/JPEG) is stretched over the flag's waving area,
//   shaded by the photo's own light and blended 80/20 into it.
// • The result is written as JPEG (output.jpg by default).
// • --preview opens a window with the result; --outline draws the region on it.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use flag_wrap::{
    FlagProfile, FlagTemplate, ResizeQuality,
    codec::{decode_pattern, load_base_image, save_result},
    config::DEFAULT_OUTPUT,
    init_logging, view,
};
use log::{LevelFilter, info};

/// Map a custom pattern onto the folds of a waving flag photograph.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct WrapArgs {
    /// Pattern image to project (PNG or JPEG).
    #[arg(short, long)]
    pattern: PathBuf,

    /// Where to write the result.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Base flag photograph (overrides the profile).
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Optional flag profile JSON (base image, polygon, resampling, JPEG quality).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resize quality mode: `quality` (bilinear) or `speed` (nearest).
    #[arg(long, value_name = "MODE")]
    resize_quality: Option<ResizeQuality>,

    /// JPEG quality for the written result (1-100).
    #[arg(long)]
    jpeg_quality: Option<u8>,

    /// Show the result in a window after writing it.
    #[arg(long, action = ArgAction::SetTrue)]
    preview: bool,

    /// Draw the region outline on the preview.
    #[arg(long, action = ArgAction::SetTrue, requires = "preview")]
    outline: bool,

    /// Debug-level logging (RUST_LOG still wins when set).
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = WrapArgs::parse();
    init_logging(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })?;

    /* --- Profile: file, then CLI overrides --- */
    let mut profile = match &args.config {
        Some(path) => FlagProfile::load_from_path(path)?,
        None => FlagProfile::default(),
    };
    if let Some(base) = args.base.clone() {
        profile.base_image = base;
    }
    if let Some(mode) = args.resize_quality {
        profile.resize_quality = mode;
    }
    if let Some(q) = args.jpeg_quality {
        profile.jpeg_quality = q;
    }
    let profile = profile.sanitized();

    /* --- Startup: base image + region are prepared once --- */
    let base = load_base_image(&profile.base_image)?;
    let template = FlagTemplate::new(base, profile.polygon.clone(), profile.resize_quality)
        .context("invalid flag profile")?;

    /* --- One request: decode, render, write --- */
    let bytes = fs::read(&args.pattern)
        .with_context(|| format!("failed to read pattern {}", args.pattern.display()))?;
    let pattern = decode_pattern(&bytes)
        .with_context(|| format!("could not use {} as a pattern", args.pattern.display()))?;
    let result = template.render(&pattern).context("rendering failed")?;
    save_result(&result, &args.output, profile.jpeg_quality)?;
    info!(
        "rendered {} onto {} -> {}",
        args.pattern.display(),
        profile.base_image.display(),
        args.output.display()
    );

    if args.preview {
        let outline = args.outline.then(|| (template.outline(), 0x00_FF_CC_33));
        view::show(&result, outline)?;
    }

    Ok(())
}
