//! Background capture thread implementation.

use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::frame_utils::{convert_to_rgba, mirror_horizontal};
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Commands sent to the capture thread.
pub enum CaptureCommand {
    Stop,
}

/// What the capture thread reports once the stream is open (or failed to).
pub type StreamInfo = Result<(Resolution, u32), CameraError>;

/// Run the capture loop in a background thread.
///
/// The latest decoded frame is published into `latest`; older frames are
/// overwritten, never queued.
pub fn run_capture_loop(
    settings: CameraSettings,
    latest: Arc<Mutex<Option<Frame>>>,
    stop: Arc<AtomicBool>,
    rx: Receiver<CaptureCommand>,
    info_tx: Sender<StreamInfo>,
) {
    let index = CameraIndex::Index(settings.device_index);

    let mut camera = match open_camera_with_fallback(&index, &settings) {
        Ok(cam) => cam,
        Err(e) => {
            let _ = info_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = info_tx.send(Err(classify_open_error(&e.to_string(), true)));
        return;
    }

    let res = camera.resolution();
    let actual = Resolution {
        width: res.width(),
        height: res.height(),
    };
    let fps = camera.frame_rate();
    log::info!(
        "Camera {} streaming at {}x{} @ {} fps",
        settings.device_index,
        actual.width,
        actual.height,
        fps
    );
    let _ = info_tx.send(Ok((actual, fps)));

    while !stop.load(Ordering::Relaxed) {
        if let Ok(CaptureCommand::Stop) = rx.try_recv() {
            break;
        }

        if let Ok(raw) = camera.frame() {
            // Undecodable buffers are dropped; the next one usually decodes.
            if let Some(mut frame) = convert_to_rgba(&raw) {
                if settings.mirror {
                    mirror_horizontal(&mut frame);
                }
                if let Ok(mut slot) = latest.lock() {
                    *slot = Some(frame);
                }
            }
        }

        thread::sleep(Duration::from_millis(1));
    }

    if let Err(e) = camera.stop_stream() {
        log::warn!("Failed to stop camera stream cleanly: {}", e);
    }
    log::debug!("Capture thread for camera {} exited", settings.device_index);
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let ideal = nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);

    // Closest NV12 (native on macOS), closest MJPEG (widely supported),
    // then whatever the device offers.
    let attempts = [
        RequestedFormat::new::<RgbAFormat>(RequestedFormatType::Closest(CameraFormat::new(
            ideal,
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbAFormat>(RequestedFormatType::Closest(CameraFormat::new(
            ideal,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbAFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = String::from("no capture format accepted");
    for requested in attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format attempt failed: {}", e);
                last_error = e.to_string();
            }
        }
    }

    Err(classify_open_error(&last_error, false))
}

/// Map a backend error message onto our error taxonomy.
fn classify_open_error(message: &str, streaming: bool) -> CameraError {
    let lower = message.to_lowercase();
    if lower.contains("permission")
        || lower.contains("denied")
        || lower.contains("authorization")
        || lower.contains("access")
    {
        CameraError::PermissionDenied
    } else if streaming {
        CameraError::StreamFailed(message.to_string())
    } else {
        CameraError::OpenFailed(message.to_string())
    }
}
