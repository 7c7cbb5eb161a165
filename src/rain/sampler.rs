//! Grid sampling of RGBA pixel buffers into brightness samples.

/// Smallest glyph cell, in pixels.
pub const MIN_STEP: u32 = 6;

/// A surface is split into roughly this many glyph columns.
pub const TARGET_COLUMNS: u32 = 80;

const BYTES_PER_PIXEL: usize = 4;

/// Perceptual luminance (ITU-R BT.601): `0.299*R + 0.587*G + 0.114*B`.
///
/// Kept in floating point; the fractional part feeds the alpha and color
/// derivation of each cell.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Glyph step for a surface width: `max(6, floor(width / 80))`.
///
/// Wider surfaces get bigger glyphs so the glyph count stays bounded.
pub fn step_for_width(surface_width: u32) -> u32 {
    (surface_width / TARGET_COLUMNS).max(MIN_STEP)
}

/// Number of glyph columns and rows a `width x height` surface yields.
pub fn grid_dimensions(width: u32, height: u32, step: u32) -> (u32, u32) {
    let step = step.max(1);
    (width.div_ceil(step), height.div_ceil(step))
}

/// One brightness sample, positioned at the top-left pixel of its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: u32,
    pub y: u32,
    pub brightness: f32,
}

/// A view of an RGBA buffer sampled every `step` pixels in both axes.
///
/// The grid is never materialized; [`SampleGrid::samples`] walks it lazily.
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    step: u32,
}

impl<'a> SampleGrid<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, step: u32) -> Self {
        Self {
            data,
            width,
            height,
            step: step.max(1),
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Sample at pixel `(x, y)`, or `None` if its bytes fall outside the
    /// buffer (a buffer shorter than its declared size).
    pub fn sample_at(&self, x: u32, y: u32) -> Option<Sample> {
        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        if index + 2 >= self.data.len() {
            return None;
        }
        Some(Sample {
            x,
            y,
            brightness: luma(self.data[index], self.data[index + 1], self.data[index + 2]),
        })
    }

    /// Row-major walk over every grid position with `x < width`, `y < height`.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + 'a {
        let grid = *self;
        let step = grid.step as usize;
        (0..grid.height).step_by(step).flat_map(move |y| {
            (0..grid.width)
                .step_by(step)
                .filter_map(move |x| grid.sample_at(x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_primaries() {
        assert!((luma(255, 0, 0) - 76.245).abs() < 1e-3);
        assert!((luma(0, 255, 0) - 149.685).abs() < 1e-3);
        assert!((luma(0, 0, 255) - 29.07).abs() < 1e-3);
        assert!((luma(255, 255, 255) - 255.0).abs() < 1e-3);
        assert_eq!(luma(0, 0, 0), 0.0);
    }

    #[test]
    fn test_step_policy() {
        assert_eq!(step_for_width(640), 8);
        assert_eq!(step_for_width(80), 6);
        assert_eq!(step_for_width(4000), 50);
        assert_eq!(step_for_width(0), MIN_STEP);
    }

    #[test]
    fn test_grid_dimensions_rounds_up() {
        assert_eq!(grid_dimensions(640, 480, 8), (80, 60));
        assert_eq!(grid_dimensions(10, 7, 6), (2, 2));
        assert_eq!(grid_dimensions(0, 7, 6), (0, 2));
    }

    #[test]
    fn test_samples_positions_are_stepped() {
        let data = vec![0u8; 13 * 7 * 4];
        let grid = SampleGrid::new(&data, 13, 7, 6);
        let positions: Vec<(u32, u32)> = grid.samples().map(|s| (s.x, s.y)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (6, 0), (12, 0), (0, 6), (6, 6), (12, 6)]
        );
    }

    #[test]
    fn test_short_buffer_skips_out_of_range_samples() {
        // Buffer claims 4x4 but only holds the first row.
        let data = vec![255u8; 4 * 4];
        let grid = SampleGrid::new(&data, 4, 4, 2);
        let samples: Vec<Sample> = grid.samples().collect();
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|s| s.y == 0));
    }

    #[test]
    fn test_zero_step_is_treated_as_one() {
        let data = vec![0u8; 2 * 2 * 4];
        let grid = SampleGrid::new(&data, 2, 2, 0);
        assert_eq!(grid.step(), 1);
        assert_eq!(grid.samples().count(), 4);
    }
}
