//! Per-cell glyph, alpha and color derivation.

use super::glyph::select_glyph;
use super::sampler::Sample;
use crate::surface::{RgbaColor, Surface};

/// Brightness at which a glyph becomes fully opaque.
const ALPHA_SATURATION: f32 = 200.0;

/// Green floor so dark pixels still glow faintly.
const GREEN_BOOST: f32 = 50.0;

/// Blue undertone as a fraction of green.
const BLUE_RATIO: f32 = 0.25;

/// Ephemeral render state of one sampled cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub glyph: char,
    /// `min(1, brightness / 200)`
    pub alpha: f32,
    /// `min(255, brightness + 50)`
    pub green_intensity: f32,
}

impl CellStyle {
    pub fn from_brightness(brightness: f32) -> Self {
        Self {
            glyph: select_glyph(brightness),
            alpha: (brightness / ALPHA_SATURATION).min(1.0),
            green_intensity: (brightness + GREEN_BOOST).min(255.0),
        }
    }

    /// Green-dominant fill: no red, floored green, a quarter of it as blue.
    pub fn fill_color(&self) -> RgbaColor {
        RgbaColor {
            r: 0,
            g: self.green_intensity.floor() as u8,
            b: (self.green_intensity * BLUE_RATIO).floor() as u8,
            a: self.alpha,
        }
    }
}

/// Draw one sample as a glyph centered in its `step`-sized cell.
pub fn render_cell<S: Surface + ?Sized>(surface: &mut S, sample: Sample, step: u32) {
    let style = CellStyle::from_brightness(sample.brightness);
    let half = step as f32 / 2.0;
    surface.fill_text_centered(
        style.glyph,
        sample.x as f32 + half,
        sample.y as f32 + half,
        style.fill_color(),
    );
}
