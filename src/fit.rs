// Pattern fitting: stretch the uploaded pattern over the region's bounding box
// and place it on an otherwise black canvas the size of the base image.

use crate::error::{Error, Result};
use crate::types::BoundingBox;
use image::{RgbImage, imageops::{self, FilterType}};
use log::{debug, warn};

/// Resize `pattern` to exactly `width` x `height`, ignoring aspect ratio.
pub fn resize_exact(pattern: &RgbImage, width: u32, height: u32, filter: FilterType) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        return Err(Error::Dimension(format!(
            "cannot resize pattern to zero-area target {width}x{height}"
        )));
    }
    let (pw, ph) = pattern.dimensions();
    if pw == 0 || ph == 0 {
        return Err(Error::Dimension(format!("pattern has zero area ({pw}x{ph})")));
    }
    if (pw, ph) == (width, height) {
        return Ok(pattern.clone());
    }
    Ok(imageops::resize(pattern, width, height, filter))
}

/// Produce the pattern canvas: black everywhere except inside `bbox`, which
/// holds the stretched pattern. Any part of `bbox` past the right/bottom edge
/// of the canvas is dropped.
pub fn fit_pattern(
    pattern: &RgbImage,
    bbox: &BoundingBox,
    canvas_width: u32,
    canvas_height: u32,
    filter: FilterType,
) -> Result<RgbImage> {
    let resized = resize_exact(pattern, bbox.width, bbox.height, filter)?;

    let end_x = (bbox.x as u64 + bbox.width as u64).min(canvas_width as u64) as u32;
    let end_y = (bbox.y as u64 + bbox.height as u64).min(canvas_height as u64) as u32;
    let fit_w = end_x.saturating_sub(bbox.x);
    let fit_h = end_y.saturating_sub(bbox.y);
    if fit_w == 0 || fit_h == 0 {
        return Err(Error::Dimension(format!(
            "bounding box at ({}, {}) has no overlap with the {canvas_width}x{canvas_height} canvas",
            bbox.x, bbox.y
        )));
    }
    if (fit_w, fit_h) != (bbox.width, bbox.height) {
        warn!(
            "pattern cropped from {}x{} to {fit_w}x{fit_h} to stay on the canvas",
            bbox.width, bbox.height
        );
    }

    let mut canvas = RgbImage::new(canvas_width, canvas_height);
    let crop = imageops::crop_imm(&resized, 0, 0, fit_w, fit_h).to_image();
    imageops::replace(&mut canvas, &crop, bbox.x as i64, bbox.y as i64);

    debug!(
        "pattern {}x{} fitted to {fit_w}x{fit_h} at ({}, {})",
        pattern.width(),
        pattern.height(),
        bbox.x,
        bbox.y
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, c: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(c))
    }

    #[test]
    fn small_pattern_fills_box_without_gaps() {
        let blue = solid(10, 10, [0, 0, 255]);
        let bbox = BoundingBox { x: 20, y: 30, width: 100, height: 100 };
        let canvas = fit_pattern(&blue, &bbox, 200, 200, FilterType::Triangle).unwrap();

        assert_eq!(canvas.dimensions(), (200, 200));
        for (x, y, px) in canvas.enumerate_pixels() {
            if bbox.contains(x, y) {
                assert_eq!(px, &Rgb([0, 0, 255]), "gap at ({x}, {y})");
            } else {
                assert_eq!(px, &Rgb([0, 0, 0]), "spill at ({x}, {y})");
            }
        }
    }

    #[test]
    fn resize_ignores_aspect_ratio() {
        let wide = solid(300, 20, [9, 9, 9]);
        let out = resize_exact(&wide, 40, 70, FilterType::Triangle).unwrap();
        assert_eq!(out.dimensions(), (40, 70));
    }

    #[test]
    fn box_past_edge_is_cropped() {
        let red = solid(8, 8, [255, 0, 0]);
        let bbox = BoundingBox { x: 40, y: 40, width: 20, height: 20 };
        let canvas = fit_pattern(&red, &bbox, 50, 45, FilterType::Nearest).unwrap();

        assert_eq!(canvas.dimensions(), (50, 45));
        assert_eq!(canvas.get_pixel(49, 44), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(40, 40), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(39, 40), &Rgb([0, 0, 0]));
    }

    #[test]
    fn zero_area_box_is_dimension_error() {
        let red = solid(8, 8, [255, 0, 0]);
        let flat = BoundingBox { x: 0, y: 0, width: 0, height: 10 };
        assert!(matches!(
            fit_pattern(&red, &flat, 20, 20, FilterType::Triangle),
            Err(Error::Dimension(_))
        ));
    }

    #[test]
    fn box_off_canvas_is_dimension_error() {
        let red = solid(8, 8, [255, 0, 0]);
        let far = BoundingBox { x: 30, y: 0, width: 5, height: 5 };
        assert!(matches!(
            fit_pattern(&red, &far, 20, 20, FilterType::Triangle),
            Err(Error::Dimension(_))
        ));
    }
}
