//! Render loop lifecycle and per-tick pipeline.
//!
//! [`RainController`] owns a single [`RenderSession`] and moves it through
//! `Idle -> Starting -> Running -> Idle`. Each tick copies the current frame
//! into a surface-sized [`FrameBuffer`], clears the surface to black, samples
//! the buffer and draws one glyph per sample, then asks the [`FrameClock`]
//! for the next display frame.

mod clock;
mod controller;
mod error;
mod frame_buffer;
mod session;
mod source;

pub use clock::{FrameClock, TickHandle};
pub use controller::{PollOutcome, RainController, TickStats, SIZING_RETRY_INTERVAL};
pub use error::{Disposition, FrameUnavailable, StartError, TickError};
pub use frame_buffer::FrameBuffer;
pub use session::{Controls, LoopState, RenderSession};
pub use source::{CaptureProvider, FacingMode, FrameSource, StreamConstraints};
