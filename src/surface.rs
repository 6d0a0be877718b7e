//! Drawing surfaces
//!
//! The loader draws through the [`Surface`] trait, which only needs two
//! primitives: draw an image scaled into a rectangle and fill a rectangle with
//! a solid color. [`Canvas`] implements both on top of an [`RgbaImage`].

use image::{Pixel, Rgba, RgbaImage};

/// Destination rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A 2D target that sprites can be drawn onto.
pub trait Surface {
    /// Draw `image` scaled to fill `rect`.
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect);

    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, color: Rgba<u8>, rect: Rect);
}

/// In-memory RGBA canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a canvas filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.image.width() && y < self.image.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Visible part of `rect` as `(x0, y0, x1, y1)` canvas pixel bounds.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(rect.x).max(0);
        let y0 = i64::from(rect.y).max(0);
        let x1 = (i64::from(rect.x) + i64::from(rect.width)).min(i64::from(self.image.width()));
        let y1 = (i64::from(rect.y) + i64::from(rect.height)).min(i64::from(self.image.height()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        // Bounds lie within 0..=canvas size here
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for Canvas {
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        if rect.is_empty() || image.width() == 0 || image.height() == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };

        // Nearest-neighbor keeps pixel art crisp; only visible pixels are sampled
        let (src_w, src_h) = (u64::from(image.width()), u64::from(image.height()));
        for y in y0..y1 {
            let offset = (i64::from(y) - i64::from(rect.y)) as u64;
            let sy = (offset * src_h / u64::from(rect.height)) as u32;
            for x in x0..x1 {
                let offset = (i64::from(x) - i64::from(rect.x)) as u64;
                let sx = (offset * src_w / u64::from(rect.width)) as u32;
                let source = *image.get_pixel(sx, sy);
                self.image.get_pixel_mut(x, y).blend(&source);
            }
        }
    }

    fn fill_rect(&mut self, color: Rgba<u8>, rect: Rect) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}
