//! Drawable RGBA surface.
//!
//! Mirrors the defaults of an HTML canvas: 300×150, fully transparent, and
//! resizing clears the contents.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::HostResult;

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 150;

pub type Color = Rgba<u8>;

pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// One drawable surface. Each call to `create_canvas` makes a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Change the size. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    pub fn clear(&mut self) {
        self.fill(TRANSPARENT);
    }

    pub fn fill(&mut self, color: Color) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.pixels.put_pixel(px, py, color);
            }
        }
    }

    /// Out-of-bounds pixels are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> HostResult<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.pixels.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_default_surface() {
        let canvas = Canvas::default();
        assert_eq!((canvas.width(), canvas.height()), (300, 150));
        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(300, 0), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(2, 2, 10, 10, RED);
        assert_eq!(canvas.pixel(3, 3), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(TRANSPARENT));

        canvas.put_pixel(99, 99, RED);
        canvas.clear();
        assert_eq!(canvas.pixel(3, 3), Some(TRANSPARENT));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(RED);
        canvas.resize(3, 1);
        assert_eq!((canvas.width(), canvas.height()), (3, 1));
        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_png_encoding() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_pixel(1, 0, RED);
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(1, 0), &RED);
    }
}
