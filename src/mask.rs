// Region mask: which base-image pixels belong to the fixed polygon.
// Interior is an even-odd scanline fill sampled at pixel centers; the outline
// is then stamped with Bresenham lines so boundary pixels are always inside.

use crate::error::{Error, Result};
use crate::types::{BoundingBox, Mask, Polygon};
use log::debug;

/// Reject polygons that cannot describe a region on a `width` x `height` image.
pub fn validate_polygon(polygon: &Polygon, width: u32, height: u32) -> Result<()> {
    if polygon.len() < 3 {
        return Err(Error::Config(format!(
            "polygon needs at least 3 points, got {}",
            polygon.len()
        )));
    }
    for &(x, y) in &polygon.points {
        if x < 0 || y < 0 || x as i64 >= width as i64 || y as i64 >= height as i64 {
            return Err(Error::Config(format!(
                "polygon vertex ({x}, {y}) lies outside the {width}x{height} base image"
            )));
        }
    }
    Ok(())
}

/// Smallest rectangle holding every vertex (edges inclusive, so a
/// vertex span of 50..=150 gives a width of 101).
pub fn bounding_box(polygon: &Polygon) -> Result<BoundingBox> {
    let mut it = polygon.points.iter();
    let &(x0, y0) = it
        .next()
        .ok_or_else(|| Error::Config("polygon has no points".into()))?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
    for &(x, y) in it {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if min_x < 0 || min_y < 0 {
        return Err(Error::Config(format!(
            "polygon reaches negative coordinates ({min_x}, {min_y})"
        )));
    }
    Ok(BoundingBox {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    })
}

/// Build the mask and bounding box for `polygon` over a `width` x `height` grid.
pub fn build_region(polygon: &Polygon, width: u32, height: u32) -> Result<(Mask, BoundingBox)> {
    validate_polygon(polygon, width, height)?;
    let bbox = bounding_box(polygon)?;

    let mut mask = Mask::empty(width as usize, height as usize);
    fill_interior(&mut mask, polygon, &bbox);
    for (a, b) in polygon.edges() {
        draw_line(&mut mask, a, b);
    }

    debug!(
        "region mask: {} px inside, bbox {}x{} at ({}, {})",
        mask.count_inside(),
        bbox.width,
        bbox.height,
        bbox.x,
        bbox.y
    );
    Ok((mask, bbox))
}

/// Even-odd fill: each row collects edge crossings with a half-open rule
/// (y1 <= y < y2) so shared vertices are counted once.
fn fill_interior(mask: &mut Mask, polygon: &Polygon, bbox: &BoundingBox) {
    let mut crossings: Vec<f64> = Vec::with_capacity(polygon.len());
    for y in bbox.y..bbox.y + bbox.height {
        let yf = y as f64;
        crossings.clear();
        for ((x1, y1), (x2, y2)) in polygon.edges() {
            if y1 == y2 {
                continue; // horizontal edges are stamped by the outline pass
            }
            let (lo, hi) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
            if yf < lo as f64 || yf >= hi as f64 {
                continue;
            }
            let t = (yf - y1 as f64) / (y2 - y1) as f64;
            crossings.push(x1 as f64 + t * (x2 - x1) as f64);
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil().max(0.0) as usize;
            let end = (pair[1].floor() as i64).min(mask.width as i64 - 1);
            if end < start as i64 {
                continue;
            }
            for x in start..=end as usize {
                mask.set(x, y as usize);
            }
        }
    }
}

/// Bresenham line into the mask, clipped to its bounds.
fn draw_line(mask: &mut Mask, (x0, y0): (i32, i32), (x1, y1): (i32, i32)) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as usize) < mask.width && (y0 as usize) < mask.height {
            mask.set(x0 as usize, y0 as usize);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
