//! The full flag rendering pipeline.
//!
//! A [`FlagTemplate`] is built once from the base photograph and the region
//! polygon. Everything that depends only on those two inputs (mask, bounding
//! box, light map) is computed at construction and never changes, so one
//! template can be shared read-only between any number of concurrent renders.
//! Each call to [`FlagTemplate::render`] allocates its own working buffers.

use crate::composite::composite;
use crate::config::ResizeQuality;
use crate::error::{Error, Result};
use crate::fit::fit_pattern;
use crate::lighting::{light_map, shade};
use crate::mask::build_region;
use crate::types::{BoundingBox, LightMap, Mask, Polygon};
use image::RgbImage;
use log::{debug, info};

pub struct FlagTemplate {
    base: RgbImage,
    polygon: Polygon,
    mask: Mask,
    bbox: BoundingBox,
    light: LightMap,
    resize_quality: ResizeQuality,
}

impl FlagTemplate {
    /// Validate `polygon` against `base` and precompute the derived grids.
    pub fn new(base: RgbImage, polygon: Polygon, resize_quality: ResizeQuality) -> Result<Self> {
        let (w, h) = base.dimensions();
        if w == 0 || h == 0 {
            return Err(Error::Dimension(format!("base image has zero area ({w}x{h})")));
        }
        let (mask, bbox) = build_region(&polygon, w, h)?;
        let light = light_map(&base);
        info!(
            "flag template ready: base {w}x{h}, {} vertices, region {}x{} at ({}, {})",
            polygon.len(),
            bbox.width,
            bbox.height,
            bbox.x,
            bbox.y
        );
        Ok(Self { base, polygon, mask, bbox, light, resize_quality })
    }

    /// Wrap `pattern` onto the flag. Output always has the base image's size.
    pub fn render(&self, pattern: &RgbImage) -> Result<RgbImage> {
        let (w, h) = self.base.dimensions();
        debug!("rendering pattern {}x{}", pattern.width(), pattern.height());

        let canvas = fit_pattern(pattern, &self.bbox, w, h, self.resize_quality.filter())?;
        let shaded = shade(&canvas, &self.light)?;
        composite(&self.base, &self.mask, &shaded)
    }

    pub fn base(&self) -> &RgbImage {
        &self.base
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    /// The region outline, for overlays.
    pub fn outline(&self) -> &Polygon {
        &self.polygon
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn light_map(&self) -> &LightMap {
        &self.light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn square() -> Polygon {
        Polygon::new(vec![(2, 2), (7, 2), (7, 7), (2, 7)])
    }

    #[test]
    fn template_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlagTemplate>();
    }

    #[test]
    fn render_keeps_base_dimensions() {
        let base = RgbImage::from_pixel(12, 10, Rgb([60, 60, 60]));
        let template = FlagTemplate::new(base, square(), ResizeQuality::Quality).unwrap();
        for (pw, ph) in [(1, 1), (3, 40), (500, 7)] {
            let pattern = RgbImage::from_pixel(pw, ph, Rgb([1, 2, 3]));
            assert_eq!(template.render(&pattern).unwrap().dimensions(), (12, 10));
        }
    }

    #[test]
    fn invalid_polygon_fails_at_construction() {
        let base = RgbImage::new(5, 5);
        let res = FlagTemplate::new(base, square(), ResizeQuality::Quality);
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[test]
    fn empty_pattern_is_dimension_error() {
        let base = RgbImage::from_pixel(12, 10, Rgb([60, 60, 60]));
        let template = FlagTemplate::new(base, square(), ResizeQuality::Speed).unwrap();
        let empty = RgbImage::new(0, 0);
        assert!(matches!(template.render(&empty), Err(Error::Dimension(_))));
    }
}
