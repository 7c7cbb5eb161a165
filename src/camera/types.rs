//! Camera types and data structures.

use std::fmt;
use std::time::Instant;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Camera resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// VGA (640x480), the ideal capture size for the rain effect.
    pub const VGA: Resolution = Resolution {
        width: 640,
        height: 480,
    };
}

impl Default for Resolution {
    fn default() -> Self {
        Self::VGA
    }
}

/// Pixel layout of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// RGBA, 4 bytes per pixel
    Rgba,
}

impl FrameFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            FrameFormat::Rgba => 4,
        }
    }
}

/// A captured camera frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data, row-major
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Wrap raw RGBA bytes captured now.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            format: FrameFormat::Rgba,
            timestamp: Instant::now(),
        }
    }

    /// Number of bytes per pixel for this frame's format.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Whether the byte length agrees with the declared dimensions.
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * self.bytes_per_pixel()
    }
}

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Requested capture resolution (the camera picks the closest it supports)
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
    /// Mirror horizontally (selfie mode)
    pub mirror: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::default(),
            fps: 30,
            mirror: true,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    /// No cameras found on the system
    #[error("No cameras found")]
    NoDevices,
    /// Failed to query camera devices
    #[error("Failed to query cameras: {0}")]
    QueryFailed(String),
    /// Failed to open camera
    #[error("Failed to open camera: {0}")]
    OpenFailed(String),
    /// Camera permission denied by the OS
    #[error("Camera permission denied. Grant camera access to your terminal in the system privacy settings")]
    PermissionDenied,
    /// Camera device not found at specified index
    #[error("Camera device {0} not found. Run 'matrix-cam list-cameras' to see available devices")]
    DeviceNotFound(u32),
    /// Failed to start video stream
    #[error("Failed to start camera stream: {0}")]
    StreamFailed(String),
    /// Capture thread is already running
    #[error("Capture thread is already running")]
    AlreadyRunning,
}
