//! Webcam access and frame capture.
//!
//! - Device enumeration via [`list_devices`]
//! - A background-captured stream via [`WebcamStream`]
//! - Stream acquisition for the render loop via [`WebcamProvider`]

mod capture;
mod capture_loop;
mod device;
mod frame_utils;
mod provider;
mod types;

pub use capture::WebcamStream;
pub use device::list_devices;
pub use frame_utils::mirror_horizontal;
pub use provider::{settings_for, WebcamProvider};
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution};
