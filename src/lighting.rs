// Lighting: turn the photograph's brightness into a multiplier so the pattern
// darkens in the folds and stays bright on the highlights.

use crate::config::{LIGHT_MAX, LIGHT_MIN, LIGHT_UNIFORM, LUMA_WEIGHTS};
use crate::error::{Error, Result};
use crate::types::LightMap;
use image::{GrayImage, Luma, Rgb, RgbImage};
use log::{debug, warn};

#[inline]
fn luma(px: &Rgb<u8>) -> u8 {
    let y = LUMA_WEIGHTS[0] * px[0] as f32
        + LUMA_WEIGHTS[1] * px[1] as f32
        + LUMA_WEIGHTS[2] * px[2] as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// 8-bit grayscale intensity of every base pixel.
pub fn grayscale(base: &RgbImage) -> GrayImage {
    let (w, h) = base.dimensions();
    let mut out = GrayImage::new(w, h);
    for (src, dst) in base.pixels().zip(out.pixels_mut()) {
        *dst = Luma([luma(src)]);
    }
    out
}

/// Min-max normalise the base image's luma into [LIGHT_MIN, LIGHT_MAX].
/// A base with a single intensity gets LIGHT_UNIFORM everywhere.
pub fn light_map(base: &RgbImage) -> LightMap {
    let gray = grayscale(base);
    let (w, h) = gray.dimensions();

    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if lo >= hi {
        warn!("base image has no intensity range; lighting disabled");
        return LightMap {
            width: w as usize,
            height: h as usize,
            values: vec![LIGHT_UNIFORM; (w as usize) * (h as usize)],
        };
    }

    let span = (hi - lo) as f32;
    let values = gray
        .pixels()
        .map(|p| {
            let t = (p[0] - lo) as f32 / span;
            // Written as a two-sided blend so t=0 and t=1 land exactly on the bounds.
            (LIGHT_MIN * (1.0 - t) + LIGHT_MAX * t).clamp(LIGHT_MIN, LIGHT_MAX)
        })
        .collect();

    debug!("light map: luma range {lo}..={hi} -> {LIGHT_MIN}..={LIGHT_MAX}");
    LightMap { width: w as usize, height: h as usize, values }
}

/// Multiply every canvas pixel by its light value, truncating to u8.
pub fn shade(canvas: &RgbImage, light: &LightMap) -> Result<RgbImage> {
    let (w, h) = canvas.dimensions();
    if w as usize != light.width || h as usize != light.height {
        return Err(Error::Dimension(format!(
            "shade: canvas {w}x{h} does not match light map {}x{}",
            light.width, light.height
        )));
    }

    let mut out = RgbImage::new(w, h);
    for ((src, dst), &l) in canvas.pixels().zip(out.pixels_mut()).zip(&light.values) {
        let scale = |c: u8| (c as f32 * l).clamp(0.0, 255.0) as u8;
        *dst = Rgb([scale(src[0]), scale(src[1]), scale(src[2])]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, _| {
            let v = (x * 255 / (w - 1)) as u8;
            Rgb([v, v, v])
        })
    }

    #[test]
    fn luma_uses_bt601_weights() {
        assert_eq!(luma(&Rgb([255, 255, 255])), 255);
        assert_eq!(luma(&Rgb([255, 0, 0])), 76);
        assert_eq!(luma(&Rgb([0, 255, 0])), 150);
        assert_eq!(luma(&Rgb([0, 0, 255])), 29);
    }

    #[test]
    fn light_map_spans_exact_range() {
        let lm = light_map(&gradient(64, 4));
        let min = lm.values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = lm.values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min, LIGHT_MIN);
        assert_eq!(max, LIGHT_MAX);
        assert_eq!(lm.get(0, 0), LIGHT_MIN);
        assert_eq!(lm.get(63, 3), LIGHT_MAX);
    }

    #[test]
    fn light_map_adapts_to_narrow_range() {
        // Only two intensities present: they still map to both ends.
        let mut base = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        base.put_pixel(2, 2, Rgb([110, 110, 110]));
        let lm = light_map(&base);
        assert_eq!(lm.get(0, 0), LIGHT_MIN);
        assert_eq!(lm.get(2, 2), LIGHT_MAX);
    }

    #[test]
    fn uniform_base_gives_constant_one() {
        let lm = light_map(&RgbImage::from_pixel(8, 6, Rgb([128, 128, 128])));
        assert_eq!(lm.values.len(), 48);
        assert!(lm.values.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn shade_truncates() {
        let canvas = RgbImage::from_pixel(2, 1, Rgb([255, 100, 3]));
        let light = LightMap { width: 2, height: 1, values: vec![0.4, 1.0] };
        let out = shade(&canvas, &light).unwrap();
        // 255*0.4 = 102.0, 100*0.4 = 40.0, 3*0.4 = 1.2 -> 1
        assert_eq!(out.get_pixel(0, 0), &Rgb([102, 40, 1]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([255, 100, 3]));
    }

    #[test]
    fn shade_rejects_mismatched_map() {
        let canvas = RgbImage::new(3, 3);
        let light = LightMap { width: 2, height: 3, values: vec![1.0; 6] };
        assert!(matches!(shade(&canvas, &light), Err(Error::Dimension(_))));
    }
}
