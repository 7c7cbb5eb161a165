//! Error types for starting the rain and running its ticks.

use std::io;

use crate::camera::CameraError;

/// Starting failed; the session stays idle.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    /// No camera, permission refused, or the stream wouldn't open
    #[error("Camera access failed: {0}")]
    PermissionOrDevice(#[from] CameraError),
}

/// Why a tick had nothing to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameUnavailable {
    #[error("source has no attached stream")]
    NoSource,
    #[error("source dimensions not known yet")]
    NoSourceDimensions,
    #[error("surface has zero size")]
    NoSurfaceDimensions,
    #[error("no decodable frame yet")]
    NotDecodable,
    #[error("frame bytes don't match its dimensions")]
    SizeMismatch,
}

/// Something went wrong inside a tick.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    #[error("frame unavailable: {0}")]
    FrameUnavailable(#[from] FrameUnavailable),
    #[error("failed to present frame: {0}")]
    Present(#[from] io::Error),
}

/// What the render loop does with a failed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Skip this tick's sampling and try again next tick
    Retry,
    /// Propagate to the host
    Fatal,
}

impl TickError {
    pub fn disposition(&self) -> Disposition {
        match self {
            TickError::FrameUnavailable(_) => Disposition::Retry,
            TickError::Present(_) => Disposition::Fatal,
        }
    }
}
