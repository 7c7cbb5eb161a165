//! Terminal host: raw mode, the rain surface, status bar and notices.

mod notice;
mod raw_mode;
mod status_bar;
mod surface;

pub use notice::{notice_rect, render_notice, wrap_text, NoticeRect};
pub use raw_mode::TerminalGuard;
pub use status_bar::{StatusBar, StatusSegment, StatusView};
pub use surface::{TerminalCell, TerminalSurface, CHAR_ASPECT_RATIO, SIDE_MARGIN};
