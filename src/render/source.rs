//! Boundary traits for frame sources and the providers that acquire them.

use std::future::Future;

use crate::camera::{CameraError, Frame};

/// Which way the requested camera should face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Front-facing (selfie) camera
    #[default]
    User,
    /// Rear camera
    Environment,
}

/// What to ask a capture provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub device_index: u32,
    pub fps: u32,
    pub mirror: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            facing: FacingMode::User,
            ideal_width: 640,
            ideal_height: 480,
            device_index: 0,
            fps: 30,
            mirror: true,
        }
    }
}

/// A live source of frames, such as an open webcam stream.
pub trait FrameSource {
    /// Native frame size, or `None` while it isn't known yet.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// The most recent decodable frame, if there is one.
    fn current_frame(&self) -> Option<Frame>;

    /// Stop producing frames and release the device. Must be idempotent.
    fn stop(&mut self);
}

/// Acquires frame sources. Acquisition may wait on a permission prompt.
pub trait CaptureProvider {
    type Source: FrameSource;

    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
    ) -> impl Future<Output = Result<Self::Source, CameraError>> + Send;
}
