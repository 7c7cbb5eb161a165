//! In-memory retained glyph canvas.

use super::{DisplaySize, RgbaColor, Surface};

/// A glyph drawn onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    pub glyph: char,
    /// Center of the glyph, in pixels
    pub x: f32,
    pub y: f32,
    pub color: RgbaColor,
    /// Monospace cell size the glyph was drawn with
    pub size: u32,
}

/// Retains a background fill and the glyph draws made on top of it.
///
/// A fill covering the whole canvas resets it to a solid background; a
/// partial fill erases the glyphs centered inside the rectangle.
#[derive(Debug, Clone)]
pub struct GlyphCanvas {
    width: u32,
    height: u32,
    display: DisplaySize,
    max_display_width: f32,
    glyph_size: u32,
    background: RgbaColor,
    draws: Vec<GlyphDraw>,
    presented: u64,
}

impl GlyphCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            display: DisplaySize::fit(width, height, 0.0),
            max_display_width: f32::INFINITY,
            glyph_size: crate::rain::MIN_STEP,
            background: RgbaColor::TRANSPARENT,
            draws: Vec::new(),
            presented: 0,
        }
    }

    /// Limit how wide the canvas may be displayed.
    pub fn with_max_display_width(mut self, max: f32) -> Self {
        self.max_display_width = max;
        self
    }

    pub fn set_max_display_width(&mut self, max: f32) {
        self.max_display_width = max;
    }

    pub fn background(&self) -> RgbaColor {
        self.background
    }

    pub fn draws(&self) -> &[GlyphDraw] {
        &self.draws
    }

    pub fn glyph_size(&self) -> u32 {
        self.glyph_size
    }

    /// How many frames have been presented.
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// Solid black with no glyphs on it.
    pub fn is_cleared_black(&self) -> bool {
        self.draws.is_empty() && self.background == RgbaColor::BLACK
    }
}

impl Surface for GlyphCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.display = DisplaySize::fit(width, height, 0.0);
        self.background = RgbaColor::TRANSPARENT;
        self.draws.clear();
    }

    fn display_size(&self) -> DisplaySize {
        self.display
    }

    fn set_display_size(&mut self, size: DisplaySize) {
        self.display = size;
    }

    fn max_display_width(&self) -> f32 {
        self.max_display_width
    }

    fn set_glyph_size(&mut self, px: u32) {
        self.glyph_size = px;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: RgbaColor) {
        let covers_all = x == 0 && y == 0 && width >= self.width && height >= self.height;
        if covers_all {
            self.draws.clear();
            self.background = color;
            return;
        }

        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = (x0 + width as f32, y0 + height as f32);
        self.draws
            .retain(|d| !(d.x >= x0 && d.x < x1 && d.y >= y0 && d.y < y1));
    }

    fn fill_text_centered(&mut self, glyph: char, x: f32, y: f32, color: RgbaColor) {
        self.draws.push(GlyphDraw {
            glyph,
            x,
            y,
            color,
            size: self.glyph_size,
        });
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}
