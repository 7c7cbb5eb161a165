//! Webcam stream handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::capture_loop::{run_capture_loop, CaptureCommand, StreamInfo};
use super::device::list_devices;
use super::types::{CameraError, CameraSettings, Frame, Resolution};
use crate::render::FrameSource;

/// A running (or ready to run) webcam stream.
///
/// The camera itself is opened inside a background thread that keeps the
/// most recent decoded frame in a shared slot. `start()` blocks until the
/// thread reports that the stream is open or that opening failed.
pub struct WebcamStream {
    /// Latest captured frame (shared with capture thread)
    latest: Arc<Mutex<Option<Frame>>>,
    capture_thread: Option<JoinHandle<()>>,
    command_tx: Option<Sender<CaptureCommand>>,
    stop_signal: Arc<AtomicBool>,
    settings: CameraSettings,
    /// Negotiated resolution, known once the stream is open
    actual_resolution: Option<Resolution>,
    actual_fps: Option<u32>,
}

impl std::fmt::Debug for WebcamStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebcamStream")
            .field("settings", &self.settings)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl WebcamStream {
    /// Validate that the requested device exists.
    ///
    /// The stream isn't opened until `start()`.
    ///
    /// # Errors
    /// * `CameraError::NoDevices` - If the system reports no cameras at all
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        if devices.is_empty() {
            return Err(CameraError::NoDevices);
        }
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        Ok(Self {
            latest: Arc::new(Mutex::new(None)),
            capture_thread: None,
            command_tx: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            settings,
            actual_resolution: None,
            actual_fps: None,
        })
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Resolution the camera negotiated; `None` before `start()`.
    pub fn actual_resolution(&self) -> Option<Resolution> {
        self.actual_resolution
    }

    /// Frame rate the camera negotiated; `None` before `start()`.
    pub fn actual_fps(&self) -> Option<u32> {
        self.actual_fps
    }

    /// Open the stream and start capturing on a background thread.
    ///
    /// # Errors
    /// * `CameraError::AlreadyRunning` - If capture is already running
    /// * `CameraError::PermissionDenied` - If the OS refuses camera access
    /// * `CameraError::OpenFailed` / `StreamFailed` - For other failures
    pub fn start(&mut self) -> Result<(), CameraError> {
        if self.is_running() {
            return Err(CameraError::AlreadyRunning);
        }

        self.stop_signal.store(false, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel();
        self.command_tx = Some(tx);

        let latest = Arc::clone(&self.latest);
        let stop = Arc::clone(&self.stop_signal);
        let settings = self.settings.clone();
        let (info_tx, info_rx) = mpsc::channel::<StreamInfo>();

        let handle = std::thread::spawn(move || {
            run_capture_loop(settings, latest, stop, rx, info_tx);
        });
        self.capture_thread = Some(handle);

        match info_rx.recv() {
            Ok(Ok((res, fps))) => {
                self.actual_resolution = Some(res);
                self.actual_fps = Some(fps);
                Ok(())
            }
            Ok(Err(e)) => {
                self.join_capture_thread();
                Err(e)
            }
            Err(_) => {
                self.join_capture_thread();
                Err(CameraError::StreamFailed(
                    "Capture thread terminated unexpectedly".to_string(),
                ))
            }
        }
    }

    /// Stop the capture thread and release the camera.
    ///
    /// Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);

        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(CaptureCommand::Stop);
        }
        self.join_capture_thread();

        if let Ok(mut slot) = self.latest.lock() {
            *slot = None;
        }
    }

    /// Latest captured frame, if any has been decoded yet.
    pub fn get_frame(&self) -> Option<Frame> {
        let slot = self.latest.lock().ok()?;
        slot.clone()
    }

    pub fn is_running(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    fn join_capture_thread(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
    }
}

impl FrameSource for WebcamStream {
    /// Native size of the delivered frames; unknown until one has decoded.
    fn dimensions(&self) -> Option<(u32, u32)> {
        let slot = self.latest.lock().ok()?;
        slot.as_ref().map(|frame| (frame.width, frame.height))
    }

    fn current_frame(&self) -> Option<Frame> {
        self.get_frame()
    }

    fn stop(&mut self) {
        WebcamStream::stop(self);
    }
}

impl Drop for WebcamStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_invalid_device() {
        let settings = CameraSettings {
            device_index: 999,
            ..CameraSettings::default()
        };
        match WebcamStream::open(settings) {
            Err(CameraError::DeviceNotFound(idx)) => assert_eq!(idx, 999),
            // Machines without any camera (CI) report this instead
            Err(CameraError::NoDevices) | Err(CameraError::QueryFailed(_)) => {}
            other => panic!("Expected DeviceNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
