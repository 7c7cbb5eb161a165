//! State that outlives a single tick.

use std::fmt;
use std::time::Instant;

use super::clock::TickHandle;
use crate::rain::MIN_STEP;

/// Lifecycle of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    /// Stream acquired (or being acquired); waiting to size the surface
    Starting,
    Running,
}

impl LoopState {
    pub fn name(&self) -> &'static str {
        match self {
            LoopState::Idle => "idle",
            LoopState::Starting => "starting",
            LoopState::Running => "running",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, LoopState::Idle)
    }

    /// Which user controls make sense in this state.
    pub fn controls(&self) -> Controls {
        Controls {
            start_enabled: !self.is_active(),
            stop_enabled: self.is_active(),
        }
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enabled state of the start/stop controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

/// The single render session: source, step and scheduling state.
#[derive(Debug)]
pub struct RenderSession<S> {
    pub(crate) state: LoopState,
    pub(crate) source: Option<S>,
    pub(crate) step: u32,
    pub(crate) scheduled_tick: Option<TickHandle>,
    /// When the next surface-sizing attempt is due (Starting only)
    pub(crate) sizing_due: Option<Instant>,
}

impl<S> Default for RenderSession<S> {
    fn default() -> Self {
        Self {
            state: LoopState::Idle,
            source: None,
            step: MIN_STEP,
            scheduled_tick: None,
            sizing_due: None,
        }
    }
}

impl<S> RenderSession<S> {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn scheduled_tick(&self) -> Option<TickHandle> {
        self.scheduled_tick
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_follow_state() {
        assert_eq!(
            LoopState::Idle.controls(),
            Controls { start_enabled: true, stop_enabled: false }
        );
        assert_eq!(
            LoopState::Starting.controls(),
            Controls { start_enabled: false, stop_enabled: true }
        );
        assert_eq!(
            LoopState::Running.controls(),
            Controls { start_enabled: false, stop_enabled: true }
        );
    }

    #[test]
    fn test_default_session_is_idle() {
        let session: RenderSession<()> = RenderSession::default();
        assert_eq!(session.state(), LoopState::Idle);
        assert_eq!(session.step(), MIN_STEP);
        assert!(session.scheduled_tick().is_none());
        assert!(!session.has_source());
    }

    #[test]
    fn test_state_names() {
        assert_eq!(LoopState::Running.to_string(), "running");
    }
}
