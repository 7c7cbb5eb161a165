//! Drawing surfaces the render loop paints rain onto.
//!
//! A surface has a pixel size (what sampling and glyph positions use) and a
//! separate displayed size (how large it appears on screen). Glyphs are
//! always drawn in a fixed monospace cell of `glyph_size` pixels.

mod canvas;

use std::io;

pub use canvas::{GlyphCanvas, GlyphDraw};

/// Straight (non-premultiplied) RGBA color with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl RgbaColor {
    pub const BLACK: RgbaColor = RgbaColor {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };

    pub const TRANSPARENT: RgbaColor = RgbaColor {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// The opaque color this one produces when painted over black.
    pub fn over_black(&self) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * a).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// On-screen size of a surface, in the surface's display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    /// Display a `width x height` surface no wider than `max_width`,
    /// scaling the height by the same ratio when it has to shrink.
    pub fn fit(width: u32, height: u32, max_width: f32) -> Self {
        let (w, h) = (width as f32, height as f32);
        if max_width > 0.0 && w > max_width {
            let ratio = max_width / w;
            Self {
                width: max_width,
                height: h * ratio,
            }
        } else {
            Self {
                width: w,
                height: h,
            }
        }
    }
}

/// A 2D drawing context for glyph output.
pub trait Surface {
    /// Pixel width.
    fn width(&self) -> u32;

    /// Pixel height.
    fn height(&self) -> u32;

    /// Change the pixel size. Like a canvas, this discards the contents.
    fn set_size(&mut self, width: u32, height: u32);

    fn display_size(&self) -> DisplaySize;

    fn set_display_size(&mut self, size: DisplaySize);

    /// Widest the surface may appear on screen, in display units.
    fn max_display_width(&self) -> f32;

    /// Monospace cell size, in pixels, used by subsequent glyph draws.
    fn set_glyph_size(&mut self, px: u32);

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: RgbaColor);

    /// Draw a glyph centered (horizontally and vertically) on `(x, y)`.
    fn fill_text_centered(&mut self, glyph: char, x: f32, y: f32, color: RgbaColor);

    /// Push the finished frame to wherever this surface is shown.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Paint the whole surface black.
    fn clear_black(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0, 0, w, h, RgbaColor::BLACK);
    }
}
