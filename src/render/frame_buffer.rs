//! Surface-sized scratch copy of the current frame.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};

use super::error::FrameUnavailable;
use crate::camera::{Frame, FrameFormat};

/// RGBA pixels of the frame being sampled this tick.
///
/// The allocation is reused between ticks but the contents are rewritten
/// by every `copy_from`; nothing from a previous tick is ever sampled.
#[derive(Debug)]
pub struct FrameBuffer {
    image: RgbaImage,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Copy `frame` into a `width x height` buffer, scaling with nearest
    /// neighbour when the sizes differ.
    pub fn copy_from(
        &mut self,
        frame: &Frame,
        width: u32,
        height: u32,
    ) -> Result<(), FrameUnavailable> {
        if width == 0 || height == 0 {
            return Err(FrameUnavailable::NoSurfaceDimensions);
        }
        if frame.width == 0 || frame.height == 0 {
            return Err(FrameUnavailable::NotDecodable);
        }
        if frame.format != FrameFormat::Rgba || !frame.is_complete() {
            return Err(FrameUnavailable::SizeMismatch);
        }

        if frame.width == width && frame.height == height {
            if self.image.dimensions() != (width, height) {
                self.image = RgbaImage::new(width, height);
            }
            let dst: &mut [u8] = &mut self.image;
            dst.copy_from_slice(&frame.data);
        } else {
            let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
                frame.width,
                frame.height,
                frame.data.as_slice(),
            )
            .ok_or(FrameUnavailable::SizeMismatch)?;
            self.image = imageops::resize(&view, width, height, FilterType::Nearest);
        }

        Ok(())
    }
}
