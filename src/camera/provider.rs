//! Webcam-backed [`CaptureProvider`].

use std::future::Future;

use super::capture::WebcamStream;
use super::types::{CameraError, CameraSettings, Resolution};
use crate::render::{CaptureProvider, FacingMode, StreamConstraints};

/// Acquires webcam streams through nokhwa.
///
/// Opening a camera blocks (device query, format negotiation, OS permission
/// prompt), so the work runs on tokio's blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebcamProvider;

impl WebcamProvider {
    pub fn new() -> Self {
        Self
    }
}

/// Translate stream constraints into capture settings.
///
/// Desktop webcams don't expose a facing direction, so `FacingMode::User`
/// means "the configured device", which is index 0 unless overridden.
pub fn settings_for(constraints: &StreamConstraints) -> CameraSettings {
    if constraints.facing != FacingMode::User {
        log::debug!(
            "Facing mode {:?} not selectable on this platform, using device {}",
            constraints.facing,
            constraints.device_index
        );
    }

    CameraSettings {
        device_index: constraints.device_index,
        resolution: Resolution {
            width: constraints.ideal_width,
            height: constraints.ideal_height,
        },
        fps: constraints.fps,
        mirror: constraints.mirror,
    }
}

impl CaptureProvider for WebcamProvider {
    type Source = WebcamStream;

    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
    ) -> impl Future<Output = Result<WebcamStream, CameraError>> + Send {
        let settings = settings_for(constraints);
        async move {
            log::info!(
                "Requesting camera {} at {}x{}",
                settings.device_index,
                settings.resolution.width,
                settings.resolution.height
            );
            tokio::task::spawn_blocking(move || {
                let mut stream = WebcamStream::open(settings)?;
                stream.start()?;
                Ok(stream)
            })
            .await
            .map_err(|e| CameraError::StreamFailed(format!("camera task failed: {e}")))?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_for_default_constraints() {
        let settings = settings_for(&StreamConstraints::default());
        assert_eq!(settings.device_index, 0);
        assert_eq!(settings.resolution, Resolution::VGA);
        assert!(settings.mirror);
    }

    #[test]
    fn test_settings_for_carries_overrides() {
        let constraints = StreamConstraints {
            device_index: 2,
            fps: 15,
            mirror: false,
            ..StreamConstraints::default()
        };
        let settings = settings_for(&constraints);
        assert_eq!(settings.device_index, 2);
        assert_eq!(settings.fps, 15);
        assert!(!settings.mirror);
    }
}
