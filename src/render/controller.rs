//! The render loop: acquire, size, then sample and draw once per tick.

use std::time::{Duration, Instant};

use super::clock::{FrameClock, TickHandle};
use super::error::{Disposition, FrameUnavailable, StartError, TickError};
use super::frame_buffer::FrameBuffer;
use super::session::{LoopState, RenderSession};
use super::source::{CaptureProvider, FrameSource, StreamConstraints};
use crate::rain::{grid_dimensions, render_cell, step_for_width, SampleGrid};
use crate::surface::{DisplaySize, Surface};

/// How long to wait before re-checking a source whose size isn't known yet.
pub const SIZING_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// What a call to [`RainController::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing to do while idle
    Idle,
    /// Starting, but the source has no dimensions yet
    AwaitingSource,
    /// Running, no tick was pending for this display frame
    NoTickDue,
    /// A tick sampled and drew this many cells
    Rendered { cells: usize },
    /// A tick found no usable frame and was rescheduled
    Skipped,
}

/// Counters describing the loop's recent activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ticks_rendered: u64,
    pub ticks_skipped: u64,
    /// Cells drawn by the most recent rendered tick
    pub last_cells: usize,
    /// Ticks executing right now
    pub in_flight: u32,
    /// Most ticks ever executing at once
    pub peak_in_flight: u32,
}

/// Owns the render session and drives it from start to stop.
///
/// The host calls [`start`](Self::start) / [`stop`](Self::stop) on user
/// request and [`poll`](Self::poll) once per display frame.
pub struct RainController<P: CaptureProvider, S: Surface> {
    provider: P,
    surface: S,
    constraints: StreamConstraints,
    clock: FrameClock,
    scratch: FrameBuffer,
    session: RenderSession<P::Source>,
    stats: TickStats,
}

impl<P: CaptureProvider, S: Surface> RainController<P, S> {
    pub fn new(provider: P, surface: S, constraints: StreamConstraints) -> Self {
        Self {
            provider,
            surface,
            constraints,
            clock: FrameClock::new(),
            scratch: FrameBuffer::new(),
            session: RenderSession::default(),
            stats: TickStats::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.session.state()
    }

    pub fn step(&self) -> u32 {
        self.session.step()
    }

    /// Handle of the tick scheduled for the next display frame.
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.session.scheduled_tick()
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    pub fn session(&self) -> &RenderSession<P::Source> {
        &self.session
    }

    pub fn constraints(&self) -> &StreamConstraints {
        &self.constraints
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Acquire a stream and enter `Starting`.
    ///
    /// A loop that is already running is torn down first, so no tick of
    /// the old loop can fire after this call. On failure the session is
    /// left idle with nothing scheduled.
    pub async fn start(&mut self, now: Instant) -> Result<(), StartError> {
        let restarting = self.session.state.is_active();
        self.cancel_scheduled_tick();
        self.release_source();
        self.session.state = LoopState::Starting;
        self.session.sizing_due = None;

        match self.provider.request_stream(&self.constraints).await {
            Ok(source) => {
                log::info!("Frame source acquired");
                self.session.source = Some(source);
                // Source ready: size on the next poll
                self.session.sizing_due = Some(now);
                Ok(())
            }
            Err(e) => {
                log::warn!("Frame source acquisition failed: {}", e);
                self.session.state = LoopState::Idle;
                if restarting {
                    self.clear_surface();
                }
                Err(StartError::PermissionOrDevice(e))
            }
        }
    }

    /// Advance the loop for the display frame starting at `now`.
    ///
    /// # Errors
    /// Only failures classified [`Disposition::Fatal`] are returned. The
    /// source is released first and the session is back to `Idle`.
    pub fn poll(&mut self, now: Instant) -> Result<PollOutcome, TickError> {
        match self.session.state {
            LoopState::Idle => Ok(PollOutcome::Idle),
            LoopState::Starting => {
                let due = self.session.sizing_due.map_or(true, |at| now >= at);
                if !due {
                    return Ok(PollOutcome::AwaitingSource);
                }
                if self.size_surface() {
                    self.session.state = LoopState::Running;
                    self.session.sizing_due = None;
                    self.start_rendering()
                } else {
                    log::debug!("Source dimensions unknown, retrying sizing");
                    self.session.sizing_due = Some(now + SIZING_RETRY_INTERVAL);
                    Ok(PollOutcome::AwaitingSource)
                }
            }
            LoopState::Running => match self.clock.fire() {
                Some(handle) if self.session.scheduled_tick == Some(handle) => {
                    self.session.scheduled_tick = None;
                    self.tick()
                }
                Some(stale) => {
                    log::debug!("Ignoring stale tick {:?}", stale);
                    Ok(PollOutcome::NoTickDue)
                }
                None => Ok(PollOutcome::NoTickDue),
            },
        }
    }

    /// Re-run sizing after the available screen area changed.
    ///
    /// While running, the surface is resized from the current source and
    /// the step recomputed; otherwise only the displayed size is refit.
    pub fn resize_display(&mut self) {
        if self.session.state == LoopState::Running && self.size_surface() {
            return;
        }
        self.fit_display();
    }

    /// Stop the loop, release the source and paint the surface black.
    ///
    /// Idempotent, and fine to call without a prior start.
    pub fn stop(&mut self) {
        self.cancel_scheduled_tick();
        let had_source = self.release_source();
        self.session.state = LoopState::Idle;
        self.session.sizing_due = None;
        self.clear_surface();
        if had_source {
            log::info!("Rain stopped");
        }
    }

    fn size_surface(&mut self) -> bool {
        let dims = self
            .session
            .source
            .as_ref()
            .and_then(|source| source.dimensions())
            .filter(|&(w, h)| w > 0 && h > 0);
        let Some((width, height)) = dims else {
            return false;
        };

        self.surface.set_size(width, height);
        self.fit_display();
        self.session.step = step_for_width(width);

        let (cols, rows) = grid_dimensions(width, height, self.session.step);
        log::info!(
            "Surface sized to {}x{}, glyph step {} ({}x{} cells)",
            width,
            height,
            self.session.step,
            cols,
            rows
        );
        true
    }

    fn fit_display(&mut self) {
        let size = DisplaySize::fit(
            self.surface.width(),
            self.surface.height(),
            self.surface.max_display_width(),
        );
        self.surface.set_display_size(size);
    }

    fn start_rendering(&mut self) -> Result<PollOutcome, TickError> {
        self.cancel_scheduled_tick();
        self.tick()
    }

    /// Run one tick to completion, then schedule the next one.
    fn tick(&mut self) -> Result<PollOutcome, TickError> {
        self.stats.in_flight += 1;
        self.stats.peak_in_flight = self.stats.peak_in_flight.max(self.stats.in_flight);
        let result = self.render_frame();
        self.stats.in_flight -= 1;

        let outcome = match result {
            Ok(cells) => {
                self.stats.ticks_rendered += 1;
                self.stats.last_cells = cells;
                PollOutcome::Rendered { cells }
            }
            Err(e) if e.disposition() == Disposition::Retry => {
                log::trace!("Skipping tick: {}", e);
                self.stats.ticks_skipped += 1;
                PollOutcome::Skipped
            }
            Err(e) => {
                log::error!("Render loop halted: {}", e);
                self.release_source();
                self.session.state = LoopState::Idle;
                return Err(e);
            }
        };

        self.session.scheduled_tick = Some(self.clock.request());
        Ok(outcome)
    }

    fn render_frame(&mut self) -> Result<usize, TickError> {
        let source = self.session.source.as_ref().ok_or(FrameUnavailable::NoSource)?;
        match source.dimensions() {
            Some((w, h)) if w > 0 && h > 0 => {}
            _ => return Err(FrameUnavailable::NoSourceDimensions.into()),
        }
        let (width, height) = (self.surface.width(), self.surface.height());
        if width == 0 || height == 0 {
            return Err(FrameUnavailable::NoSurfaceDimensions.into());
        }

        let frame = source.current_frame().ok_or(FrameUnavailable::NotDecodable)?;
        self.scratch.copy_from(&frame, width, height)?;

        let step = self.session.step;
        self.surface.clear_black();
        self.surface.set_glyph_size(step);

        let grid = SampleGrid::new(self.scratch.as_raw(), width, height, step);
        let mut cells = 0;
        for sample in grid.samples() {
            render_cell(&mut self.surface, sample, step);
            cells += 1;
        }

        self.surface.present()?;
        Ok(cells)
    }

    fn cancel_scheduled_tick(&mut self) {
        if let Some(handle) = self.session.scheduled_tick.take() {
            self.clock.cancel(handle);
        }
    }

    fn release_source(&mut self) -> bool {
        match self.session.source.take() {
            Some(mut source) => {
                source.stop();
                true
            }
            None => false,
        }
    }

    fn clear_surface(&mut self) {
        self.surface.clear_black();
        if let Err(e) = self.surface.present() {
            log::warn!("Failed to present cleared surface: {}", e);
        }
    }
}
