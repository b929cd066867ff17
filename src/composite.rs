// Compositing: mix the shaded pattern with the photograph inside the mask and
// keep the photograph untouched outside it.

use crate::config::{FLAG_WEIGHT, PATTERN_WEIGHT};
use crate::error::{Error, Result};
use crate::types::Mask;
use image::{Rgb, RgbImage};

/// round(PATTERN_WEIGHT * pattern + FLAG_WEIGHT * flag), saturated to u8.
#[inline]
pub fn blend_channel(pattern: u8, flag: u8) -> u8 {
    (PATTERN_WEIGHT * pattern as f32 + FLAG_WEIGHT * flag as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Zero out every pixel of `img` on the wrong side of the mask.
pub fn restrict(img: &RgbImage, mask: &Mask, keep_inside: bool) -> Result<RgbImage> {
    check_dims("restrict", img, mask)?;
    let mut out = img.clone();
    for (px, &inside) in out.pixels_mut().zip(&mask.inside) {
        if inside != keep_inside {
            *px = Rgb([0, 0, 0]);
        }
    }
    Ok(out)
}

/// Final image: blended pattern inside the mask, original base outside.
pub fn composite(base: &RgbImage, mask: &Mask, shaded: &RgbImage) -> Result<RgbImage> {
    check_dims("composite", base, mask)?;
    if shaded.dimensions() != base.dimensions() {
        return Err(Error::Dimension(format!(
            "composite: shaded pattern {:?} does not match base {:?}",
            shaded.dimensions(),
            base.dimensions()
        )));
    }

    let pattern_region = restrict(shaded, mask, true)?;
    let flag_region = restrict(base, mask, true)?;
    let mut result = restrict(base, mask, false)?; // background

    for (((dst, p), f), &inside) in result
        .pixels_mut()
        .zip(pattern_region.pixels())
        .zip(flag_region.pixels())
        .zip(&mask.inside)
    {
        if !inside {
            continue; // background pixel, already the base
        }
        *dst = Rgb([
            blend_channel(p[0], f[0]),
            blend_channel(p[1], f[1]),
            blend_channel(p[2], f[2]),
        ]);
    }
    Ok(result)
}

fn check_dims(stage: &str, img: &RgbImage, mask: &Mask) -> Result<()> {
    let (w, h) = img.dimensions();
    if w as usize != mask.width || h as usize != mask.height {
        return Err(Error::Dimension(format!(
            "{stage}: image {w}x{h} does not match mask {}x{}",
            mask.width, mask.height
        )));
    }
    Ok(())
}
