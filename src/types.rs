// Core grid types shared by the pipeline stages.
// Images themselves are `image::RgbImage`; these are the derived grids.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Ordered, implicitly closed vertex loop in base-image pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub points: Vec<(i32, i32)>,
}

impl Polygon {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closed edge list: (p0,p1), (p1,p2), ..., (pn-1,p0).
    pub fn edges(&self) -> impl Iterator<Item = ((i32, i32), (i32, i32))> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Minimal axis-aligned rectangle around a polygon, inclusive of its edge pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Binary region mask; `true` = inside the polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub inside: Vec<bool>, // length = width * height, row-major
}

impl Mask {
    pub fn empty(width: usize, height: usize) -> Self {
        Self { width, height, inside: vec![false; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.inside[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.inside[y * self.width + x] = true;
    }

    pub fn count_inside(&self) -> usize {
        self.inside.iter().filter(|&&v| v).count()
    }
}

/// Per-pixel brightness multiplier derived from the base image.
#[derive(Debug, Clone, PartialEq)]
pub struct LightMap {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>, // length = width * height, in [LIGHT_MIN, LIGHT_MAX]
}

impl LightMap {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }
}

/// Packed 0x00RRGGBB pixels, the layout minifb wants.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn from_rgb(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
        for pixel in img.pixels() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            pixels.push((r << 16) | (g << 8) | b);
        }
        Self { width: w as usize, height: h as usize, pixels }
    }
}
