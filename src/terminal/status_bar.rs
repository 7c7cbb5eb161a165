//! Status bar with the loop state and the start/stop controls.

use crate::render::LoopState;

/// A run of status bar text; disabled controls are drawn dimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSegment {
    pub text: String,
    pub enabled: bool,
}

impl StatusSegment {
    fn new(text: impl Into<String>, enabled: bool) -> Self {
        Self {
            text: text.into(),
            enabled,
        }
    }
}

/// What the status bar reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    pub state: LoopState,
    pub step: u32,
    /// Glyph columns and rows per frame
    pub grid: (u32, u32),
}

/// Status bar shown on the last terminal row.
///
/// Format: ` matrix-cam | running | 80x60 @ 8px | [s] start  [x] stop  [q] quit `
#[derive(Debug, Clone)]
pub struct StatusBar {
    pub visible: bool,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn with_visibility(visible: bool) -> Self {
        Self { visible }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn segments(&self, view: &StatusView) -> Vec<StatusSegment> {
        let controls = view.state.controls();
        let grid = match view.state {
            LoopState::Running => format!("{}x{} @ {}px", view.grid.0, view.grid.1, view.step),
            _ => "no signal".to_string(),
        };

        vec![
            StatusSegment::new(format!(" matrix-cam | {} | {} | ", view.state, grid), true),
            StatusSegment::new("[s] start", controls.start_enabled),
            StatusSegment::new("  ", true),
            StatusSegment::new("[x] stop", controls.stop_enabled),
            StatusSegment::new("  [q] quit ", true),
        ]
    }

    pub fn format(&self, view: &StatusView) -> String {
        self.segments(view)
            .into_iter()
            .map(|segment| segment.text)
            .collect()
    }
}
