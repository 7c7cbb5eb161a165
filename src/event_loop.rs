//! Async event loop: terminal input, resizes and display frames.

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::MissedTickBehavior;

use crate::input::{handle_key_event, KeyAction};
use crate::rain::grid_dimensions;
use crate::render::{CaptureProvider, LoopState, PollOutcome, RainController, TickError};
use crate::shutdown;
use crate::surface::Surface;
use crate::terminal::{StatusBar, StatusView, TerminalSurface};

const NOTICE_TITLE: &str = "Camera unavailable";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Render loop failed: {0}")]
    Tick(#[from] TickError),
}

/// Whether the loop keeps going after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Interrupted,
}

/// The controller plus the terminal chrome around it.
pub struct App<P: CaptureProvider, W: Write> {
    controller: RainController<P, TerminalSurface<W>>,
    status_bar: StatusBar,
    shown: Option<StatusView>,
    notice: Option<String>,
}

impl<P: CaptureProvider, W: Write> App<P, W> {
    pub fn new(controller: RainController<P, TerminalSurface<W>>, status_bar: StatusBar) -> Self {
        let mut app = Self {
            controller,
            status_bar,
            shown: None,
            notice: None,
        };
        app.apply_status_visibility();
        app.controller.resize_display();
        app
    }

    pub fn controller(&self) -> &RainController<P, TerminalSurface<W>> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RainController<P, TerminalSurface<W>> {
        &mut self.controller
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    /// Message of the failure notice waiting for a key press.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status_view(&self) -> StatusView {
        self.view_for(self.controller.state())
    }

    /// Handle a key press.
    ///
    /// While a notice is open, quit keys still quit and any other key just
    /// dismisses it.
    pub async fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<Flow, RunError> {
        let action = handle_key_event(key);
        if self.notice.is_some() {
            match action {
                KeyAction::Quit => return Ok(Flow::Quit),
                KeyAction::None => return Ok(Flow::Continue),
                _ => {
                    self.notice = None;
                    self.redraw()?;
                    return Ok(Flow::Continue);
                }
            }
        }
        self.apply(action, now).await
    }

    pub async fn apply(&mut self, action: KeyAction, now: Instant) -> Result<Flow, RunError> {
        let controls = self.controller.state().controls();
        match action {
            KeyAction::Start if controls.start_enabled => self.start(now).await?,
            KeyAction::Stop if controls.stop_enabled => {
                self.controller.stop();
                self.redraw()?;
            }
            KeyAction::ToggleStatus => {
                self.status_bar.toggle();
                self.apply_status_visibility();
                self.controller.resize_display();
                self.redraw()?;
            }
            KeyAction::Quit => return Ok(Flow::Quit),
            KeyAction::Start | KeyAction::Stop | KeyAction::None => {}
        }
        Ok(Flow::Continue)
    }

    /// Drive one display frame.
    pub fn on_frame(&mut self, now: Instant) -> Result<PollOutcome, RunError> {
        let changed = self.sync_status();
        let outcome = self.controller.poll(now)?;
        let rendered = matches!(outcome, PollOutcome::Rendered { .. });
        if changed && !rendered && self.notice.is_none() {
            self.controller.surface_mut().present()?;
        }
        Ok(outcome)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), RunError> {
        log::debug!("Terminal resized to {}x{}", cols, rows);
        self.controller.surface_mut().set_terminal_size(cols, rows);
        self.controller.resize_display();
        self.redraw()
    }

    async fn start(&mut self, now: Instant) -> Result<(), RunError> {
        self.show_state(LoopState::Starting)?;
        if let Err(e) = self.controller.start(now).await {
            self.notice = Some(e.to_string());
            self.redraw()?;
        }
        Ok(())
    }

    /// Repaint the current canvas, the status bar and any open notice.
    fn redraw(&mut self) -> Result<(), RunError> {
        self.sync_status();
        let surface = self.controller.surface_mut();
        surface.present()?;
        if let Some(message) = &self.notice {
            surface.show_notice(NOTICE_TITLE, message)?;
        }
        Ok(())
    }

    fn show_state(&mut self, state: LoopState) -> Result<(), RunError> {
        let view = self.view_for(state);
        self.set_status(view);
        self.controller.surface_mut().present()?;
        Ok(())
    }

    /// Push the current status to the surface; true if it changed.
    fn sync_status(&mut self) -> bool {
        let view = self.status_view();
        if self.shown == Some(view) {
            return false;
        }
        self.set_status(view);
        true
    }

    fn set_status(&mut self, view: StatusView) {
        self.shown = Some(view);
        if self.status_bar.visible {
            let segments = self.status_bar.segments(&view);
            self.controller.surface_mut().set_status(Some(segments));
        }
    }

    fn apply_status_visibility(&mut self) {
        self.shown = None;
        if !self.status_bar.visible {
            self.controller.surface_mut().set_status(None);
        }
        self.sync_status();
    }

    fn view_for(&self, state: LoopState) -> StatusView {
        let surface = self.controller.surface();
        let step = self.controller.step();
        StatusView {
            state,
            step,
            grid: grid_dimensions(surface.width(), surface.height(), step),
        }
    }
}

/// Run until the user quits or a signal arrives.
///
/// # Errors
/// Terminal I/O failures and fatal render errors end the loop.
pub async fn run<P: CaptureProvider, W: Write>(
    app: &mut App<P, W>,
    frame_interval: Duration,
    autostart: bool,
) -> Result<LoopExit, RunError> {
    let mut event_stream = EventStream::new();

    let mut frame_timer = tokio::time::interval(frame_interval);
    frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    app.redraw()?;
    if autostart {
        app.apply(KeyAction::Start, Instant::now()).await?;
    }

    loop {
        if shutdown::ctrlc_received() {
            return Ok(LoopExit::Interrupted);
        }

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if app.handle_key(key, Instant::now()).await? == Flow::Quit {
                            return Ok(LoopExit::Quit);
                        }
                    }
                    Some(Ok(Event::Resize(cols, rows))) => app.resize(cols, rows)?,
                    Some(Ok(_)) => {
                        // Mouse, focus and paste events are ignored
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(LoopExit::Quit),
                }
            }

            _ = frame_timer.tick() => {
                app.on_frame(Instant::now())?;
            }
        }
    }
}
