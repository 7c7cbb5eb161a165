//! The digital rain transform.
//!
//! A frame becomes rain in three steps:
//!
//! 1. **Sampling** - every `step` pixels, compute BT.601 luma
//! 2. **Glyph selection** - map brightness onto the fixed alphabet
//! 3. **Cell rendering** - derive alpha and green intensity, draw the glyph
//!    centered in its cell

mod cell;
mod glyph;
mod sampler;

pub use cell::{render_cell, CellStyle};
pub use glyph::{glyph_index, select_glyph, ALPHABET};
pub use sampler::{
    grid_dimensions, luma, step_for_width, Sample, SampleGrid, MIN_STEP, TARGET_COLUMNS,
};
