//! Presents a glyph canvas as colored characters in the terminal.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use super::notice::{render_notice, NoticeRect};
use super::status_bar::StatusSegment;
use crate::surface::{DisplaySize, GlyphCanvas, RgbaColor, Surface};

/// Terminal cells are about twice as tall as they are wide.
pub const CHAR_ASPECT_RATIO: f32 = 2.0;

/// Columns kept free on each side of the rain.
pub const SIDE_MARGIN: u16 = 1;

/// One occupied terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCell {
    pub glyph: char,
    pub rgb: (u8, u8, u8),
}

/// A [`Surface`] whose display unit is one terminal column.
///
/// Drawing goes to a retained [`GlyphCanvas`]; `present` maps each glyph
/// center onto the display grid and writes the grid with crossterm.
pub struct TerminalSurface<W: Write> {
    writer: W,
    canvas: GlyphCanvas,
    cols: u16,
    rows: u16,
    status: Option<Vec<StatusSegment>>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, cols: u16, rows: u16, width: u32, height: u32) -> Self {
        Self {
            writer,
            canvas: GlyphCanvas::new(width, height),
            cols,
            rows,
            status: None,
        }
    }

    pub fn set_terminal_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Show `segments` on the last row, or give the row back with `None`.
    pub fn set_status(&mut self, segments: Option<Vec<StatusSegment>>) {
        self.status = segments;
    }

    pub fn canvas(&self) -> &GlyphCanvas {
        &self.canvas
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Rows available to the rain.
    pub fn content_rows(&self) -> u16 {
        match self.status {
            Some(_) => self.rows.saturating_sub(1),
            None => self.rows,
        }
    }

    /// Columns and rows the displayed surface covers.
    pub fn viewport(&self) -> (u16, u16) {
        let display = self.canvas.display_size();
        let max_cols = self.cols.saturating_sub(SIDE_MARGIN * 2);
        let cols = (display.width.round().max(0.0) as u32).min(max_cols as u32) as u16;
        let rows = ((display.height / CHAR_ASPECT_RATIO).round().max(0.0) as u32)
            .min(self.content_rows() as u32) as u16;
        (cols, rows)
    }

    /// The display grid, row-major, `None` where nothing visible was drawn.
    ///
    /// When several glyphs land in one cell the brightest wins.
    pub fn cell_grid(&self) -> Vec<Vec<Option<TerminalCell>>> {
        let (cols, rows) = self.viewport();
        let mut grid = vec![vec![None; cols as usize]; rows as usize];
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if width == 0 || height == 0 || cols == 0 || rows == 0 {
            return grid;
        }

        for draw in self.canvas.draws() {
            let rgb = draw.color.over_black();
            if rgb == (0, 0, 0) {
                continue;
            }
            let col = (draw.x / width as f32 * cols as f32).floor();
            let row = (draw.y / height as f32 * rows as f32).floor();
            if col < 0.0 || row < 0.0 || col >= cols as f32 || row >= rows as f32 {
                continue;
            }
            let slot = &mut grid[row as usize][col as usize];
            let brighter = slot.map_or(true, |cell: TerminalCell| rgb.1 > cell.rgb.1);
            if brighter {
                *slot = Some(TerminalCell {
                    glyph: draw.glyph,
                    rgb,
                });
            }
        }
        grid
    }

    /// Draw a blocking notice box over the current screen.
    pub fn show_notice(&mut self, title: &str, message: &str) -> io::Result<NoticeRect> {
        render_notice(&mut self.writer, title, message, self.cols, self.rows)
    }

    fn write_frame(&mut self) -> io::Result<()> {
        let grid = self.cell_grid();
        let (cols, _) = self.viewport();
        let left = self.cols.saturating_sub(cols) / 2;
        let mut current: Option<(u8, u8, u8)> = None;

        queue!(self.writer, SetBackgroundColor(Color::Black))?;
        for row in 0..self.content_rows() {
            queue!(self.writer, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
            let Some(cells) = grid.get(row as usize) else {
                continue;
            };
            queue!(self.writer, MoveTo(left, row))?;
            for cell in cells {
                match cell {
                    Some(cell) => {
                        if current != Some(cell.rgb) {
                            let (r, g, b) = cell.rgb;
                            queue!(self.writer, SetForegroundColor(Color::Rgb { r, g, b }))?;
                            current = Some(cell.rgb);
                        }
                        queue!(self.writer, Print(cell.glyph))?;
                    }
                    None => queue!(self.writer, Print(' '))?,
                }
            }
        }

        self.write_status()?;
        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }

    fn write_status(&mut self) -> io::Result<()> {
        let Some(segments) = &self.status else {
            return Ok(());
        };
        let row = self.rows.saturating_sub(1);
        queue!(
            self.writer,
            MoveTo(0, row),
            SetBackgroundColor(Color::Black),
            Clear(ClearType::CurrentLine)
        )?;

        let mut remaining = self.cols as usize;
        for segment in segments {
            if remaining == 0 {
                break;
            }
            let text: String = segment.text.chars().take(remaining).collect();
            remaining -= text.chars().count();
            let color = if segment.enabled {
                Color::Green
            } else {
                Color::DarkGrey
            };
            queue!(self.writer, SetForegroundColor(color), Print(text))?;
        }
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_size(width, height);
    }

    fn display_size(&self) -> DisplaySize {
        self.canvas.display_size()
    }

    fn set_display_size(&mut self, size: DisplaySize) {
        self.canvas.set_display_size(size);
    }

    /// The terminal width minus side margins, narrowed further when the
    /// surface would otherwise be taller than the rows available.
    fn max_display_width(&self) -> f32 {
        let by_cols = self.cols.saturating_sub(SIDE_MARGIN * 2) as f32;
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if width == 0 || height == 0 {
            return by_cols;
        }
        let by_rows =
            self.content_rows() as f32 * CHAR_ASPECT_RATIO * width as f32 / height as f32;
        by_cols.min(by_rows.floor())
    }

    fn set_glyph_size(&mut self, px: u32) {
        self.canvas.set_glyph_size(px);
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: RgbaColor) {
        self.canvas.fill_rect(x, y, width, height, color);
    }

    fn fill_text_centered(&mut self, glyph: char, x: f32, y: f32, color: RgbaColor) {
        self.canvas.fill_text_centered(glyph, x, y, color);
    }

    fn present(&mut self) -> io::Result<()> {
        self.write_frame()?;
        self.canvas.present()
    }
}
