//! Fake capture provider and frame source shared by the integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};

use matrix_cam::camera::{CameraError, Frame};
use matrix_cam::render::{CaptureProvider, FrameSource, StreamConstraints};

/// What the "camera" currently shows, shared with every source it hands out.
#[derive(Debug, Default)]
pub struct Feed {
    pub dimensions: Option<(u32, u32)>,
    pub frame: Option<Frame>,
    /// How many sources have been stopped
    pub stops: u32,
}

pub type SharedFeed = Arc<Mutex<Feed>>;

pub fn feed() -> SharedFeed {
    Arc::new(Mutex::new(Feed::default()))
}

/// Show a solid `width x height` frame and report its size.
pub fn show_solid(feed: &SharedFeed, width: u32, height: u32, rgba: [u8; 4]) {
    let mut feed = feed.lock().unwrap();
    feed.dimensions = Some((width, height));
    feed.frame = Some(solid_frame(width, height, rgba));
}

pub fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> Frame {
    let data = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    Frame::from_rgba(data, width, height)
}

#[derive(Debug)]
pub struct FakeSource {
    pub id: u32,
    feed: SharedFeed,
    stopped: bool,
}

impl FrameSource for FakeSource {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.feed.lock().unwrap().dimensions
    }

    fn current_frame(&self) -> Option<Frame> {
        self.feed.lock().unwrap().frame.clone()
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.feed.lock().unwrap().stops += 1;
        }
    }
}

/// Hands out [`FakeSource`]s, or fails with `failure` when set.
#[derive(Debug)]
pub struct FakeProvider {
    pub feed: SharedFeed,
    pub failure: Option<CameraError>,
    pub requests: u32,
    pub last_constraints: Option<StreamConstraints>,
}

impl FakeProvider {
    pub fn new(feed: SharedFeed) -> Self {
        Self {
            feed,
            failure: None,
            requests: 0,
            last_constraints: None,
        }
    }

    pub fn failing(feed: SharedFeed, error: CameraError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(feed)
        }
    }
}

impl CaptureProvider for FakeProvider {
    type Source = FakeSource;

    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
    ) -> impl Future<Output = Result<FakeSource, CameraError>> + Send {
        self.requests += 1;
        self.last_constraints = Some(constraints.clone());
        let result = match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(FakeSource {
                id: self.requests,
                feed: Arc::clone(&self.feed),
                stopped: false,
            }),
        };
        async move { result }
    }
}
