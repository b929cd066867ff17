// Preview window + software overlay drawing.
// Visual effects provided here:
// 1) A window that shows the rendered flag.
// 2) An optional outline of the mapped region on top of it.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, Polygon};
use image::RgbImage;
use log::debug;
use minifb::{Key, Window, WindowOptions};

pub struct Viewer {
    window: Window, // the on-screen window you see
}

impl Viewer {
    /// Create a window sized to the result.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(30);
        Ok(Self { window })
    }

    /// Push the pixels to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }
}

/// Show `result` until the window is closed or Esc is pressed.
/// With `outline`, the region polygon is drawn over the preview (not the image).
pub fn show(result: &RgbImage, outline: Option<(&Polygon, u32)>) -> Result<()> {
    let mut frame = FrameBuffer::from_rgb(result);
    if let Some((polygon, color)) = outline {
        draw_outline(&mut frame, polygon, color);
    }

    let mut viewer = Viewer::new("Flag Pattern Projection (Esc to close)", frame.width, frame.height)?;
    debug!("preview window open at {}x{}", frame.width, frame.height);
    while viewer.is_open() && !viewer.esc_pressed() {
        viewer.present(&frame)?;
    }
    Ok(())
}

/* ---------- Software drawing ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Thin Bresenham line between (x0,y0) and (x1,y1).
fn draw_line(fb: &mut FrameBuffer, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw the closed polygon outline, clipped to the frame.
pub fn draw_outline(fb: &mut FrameBuffer, polygon: &Polygon, color: u32) {
    for (a, b) in polygon.edges() {
        draw_line(fb, a, b, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: usize, h: usize) -> FrameBuffer {
        FrameBuffer { width: w, height: h, pixels: vec![0; w * h] }
    }

    #[test]
    fn outline_touches_every_vertex() {
        let mut fb = blank(10, 10);
        let poly = Polygon::new(vec![(1, 1), (8, 1), (8, 8), (1, 8)]);
        draw_outline(&mut fb, &poly, 0x00FF_FFFF);
        for &(x, y) in &poly.points {
            assert_eq!(fb.pixels[y as usize * 10 + x as usize], 0x00FF_FFFF);
        }
        assert_eq!(fb.pixels[5 * 10 + 5], 0, "interior stays untouched");
    }

    #[test]
    fn outline_clips_off_frame_edges() {
        let mut fb = blank(4, 4);
        let poly = Polygon::new(vec![(-5, 1), (10, 1), (2, 20)]);
        draw_outline(&mut fb, &poly, 7);
        assert!(fb.pixels[4..8].iter().all(|&p| p == 7));
    }
}
