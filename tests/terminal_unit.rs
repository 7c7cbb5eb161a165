//! Unit tests for terminal module types (TerminalSurface, StatusBar, notices).
//!
//! These tests cover the pure layout and output logic without requiring a
//! real terminal; output goes to an in-memory writer.

use matrix_cam::render::LoopState;
use matrix_cam::surface::{DisplaySize, RgbaColor, Surface};
use matrix_cam::terminal::{
    notice_rect, wrap_text, StatusBar, StatusView, TerminalSurface, CHAR_ASPECT_RATIO,
};

fn rain_green() -> RgbaColor {
    RgbaColor { r: 0, g: 255, b: 63, a: 1.0 }
}

fn surface(cols: u16, rows: u16) -> TerminalSurface<Vec<u8>> {
    let mut surface = TerminalSurface::new(Vec::new(), cols, rows, 640, 480);
    let fit = DisplaySize::fit(640, 480, surface.max_display_width());
    surface.set_display_size(fit);
    surface
}

// ==================== TerminalSurface Tests ====================

#[test]
fn test_initial_pixel_size() {
    let surface = surface(80, 24);
    assert_eq!((surface.width(), surface.height()), (640, 480));
}

#[test]
fn test_viewport_fits_narrow_terminal() {
    // 78 usable columns; 78 * 3/4 / 2 = 29.25 rows fits in 100
    let surface = surface(80, 100);
    assert_eq!(surface.viewport(), (78, 29));
}

#[test]
fn test_viewport_fits_short_terminal() {
    // 30 rows of 2:1 cells show a 4:3 frame 80 columns wide
    let surface = surface(300, 30);
    assert_eq!(CHAR_ASPECT_RATIO, 2.0);
    assert_eq!(surface.viewport(), (80, 30));
}

#[test]
fn test_set_size_changes_pixels_not_terminal() {
    let mut surface = surface(80, 24);
    surface.set_size(1280, 720);
    assert_eq!((surface.width(), surface.height()), (1280, 720));
    assert_eq!(surface.terminal_size(), (80, 24));
}

#[test]
fn test_present_maps_alpha_over_black() {
    let mut surface = surface(80, 100);
    let half = RgbaColor { a: 0.5, ..rain_green() };
    surface.fill_text_centered('A', 4.0, 4.0, half);
    surface.present().unwrap();

    let output = String::from_utf8(surface.writer().clone()).unwrap();
    // 255 * 0.5 = 127.5 -> 128, 63 * 0.5 = 31.5 -> 32
    assert!(output.contains("\x1b[38;2;0;128;32m"));
    assert!(output.contains('A'));
}

#[test]
fn test_present_centers_rain() {
    let mut surface = surface(100, 100);
    surface.fill_text_centered('Z', 1.0, 1.0, rain_green());
    surface.present().unwrap();

    let (cols, _) = surface.viewport();
    let left = (100 - cols) / 2;
    let output = String::from_utf8(surface.writer().clone()).unwrap();
    // crossterm's MoveTo is 1-based: row 1, column left + 1
    assert!(output.contains(&format!("\x1b[1;{}H", left + 1)));
}

#[test]
fn test_resize_shrinks_max_width() {
    let mut surface = surface(80, 100);
    assert_eq!(surface.max_display_width(), 78.0);
    surface.set_terminal_size(40, 100);
    assert_eq!(surface.max_display_width(), 38.0);
}

// ==================== StatusBar Tests ====================

#[test]
fn test_status_bar_default_visible() {
    assert!(StatusBar::default().visible);
}

#[test]
fn test_status_bar_starting_disables_start() {
    let view = StatusView {
        state: LoopState::Starting,
        step: 6,
        grid: (0, 0),
    };
    let segments = StatusBar::new().segments(&view);
    let start = segments.iter().find(|s| s.text == "[s] start").unwrap();
    let stop = segments.iter().find(|s| s.text == "[x] stop").unwrap();
    assert!(!start.enabled);
    assert!(stop.enabled);
}

// ==================== Notice Tests ====================

#[test]
fn test_notice_fits_small_screen() {
    let lines = wrap_text("a very long explanation of what went wrong", 10);
    let rect = notice_rect(&lines, "Error", 20, 8);
    assert!(rect.width <= 16);
    assert!(rect.height <= 4);
    assert!(rect.x + rect.width <= 20);
    assert!(rect.y + rect.height <= 8);
}
