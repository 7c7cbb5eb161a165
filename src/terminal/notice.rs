//! Centered notification box for errors the user has to acknowledge.

use std::io::{self, Write};

const MARGIN: u16 = 2;
const PADDING: u16 = 1;
const HINT: &str = "Press any key to continue";

/// Where a notice box lands on screen (0-based cells, border included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }

    lines
}

/// Lay out a notice with `lines` of body text (plus the title row) on a
/// `cols x rows` screen.
pub fn notice_rect(lines: &[String], title: &str, cols: u16, rows: u16) -> NoticeRect {
    let longest = lines
        .iter()
        .map(|l| l.chars().count())
        .chain([title.chars().count(), HINT.chars().count()])
        .max()
        .unwrap_or(0) as u16;

    let max_width = cols.saturating_sub(MARGIN * 2);
    let width = (longest + 2 + PADDING * 2).min(max_width);
    // Title, blank, body, blank, hint
    let max_height = rows.saturating_sub(MARGIN * 2);
    let height = (lines.len() as u16 + 6).min(max_height);

    NoticeRect {
        x: cols.saturating_sub(width) / 2,
        y: rows.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Draw a bordered notice with a title, a wrapped message and a
/// "press any key" hint, centered on a `cols x rows` screen.
pub fn render_notice<W: Write>(
    writer: &mut W,
    title: &str,
    message: &str,
    cols: u16,
    rows: u16,
) -> io::Result<NoticeRect> {
    let text_width = cols.saturating_sub(MARGIN * 2 + 2 + PADDING * 2).max(1) as usize;
    let lines = wrap_text(message, text_width);
    let rect = notice_rect(&lines, title, cols, rows);
    if rect.width < 4 || rect.height < 3 {
        return Ok(rect);
    }
    let inner_width = rect.width - 2;
    let inner_height = rect.height - 2;

    let mut body: Vec<String> = Vec::with_capacity(inner_height as usize);
    body.push(title.to_string());
    body.push(String::new());
    body.extend(lines);
    body.push(String::new());
    body.push(HINT.to_string());

    let mut output = String::new();
    output.push_str("\x1b[0m\x1b[40m\x1b[32m");

    // Top border
    output.push_str(&format!("\x1b[{};{}H┌", rect.y + 1, rect.x + 1));
    output.push_str(&"─".repeat(inner_width as usize));
    output.push('┐');

    for row in 0..inner_height {
        let text = body.get(row as usize).map(String::as_str).unwrap_or("");
        let text: String = text
            .chars()
            .take(inner_width.saturating_sub(PADDING * 2) as usize)
            .collect();
        let pad = inner_width as usize - PADDING as usize - text.chars().count();
        output.push_str(&format!("\x1b[{};{}H│", rect.y + row + 2, rect.x + 1));
        output.push_str(&" ".repeat(PADDING as usize));
        if row == 0 {
            output.push_str("\x1b[1m");
            output.push_str(&text);
            output.push_str("\x1b[22m");
        } else {
            output.push_str(&text);
        }
        output.push_str(&" ".repeat(pad));
        output.push('│');
    }

    // Bottom border
    output.push_str(&format!("\x1b[{};{}H└", rect.y + rect.height, rect.x + 1));
    output.push_str(&"─".repeat(inner_width as usize));
    output.push('┘');
    output.push_str("\x1b[0m");

    writer.write_all(output.as_bytes())?;
    writer.flush()?;
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("camera access was denied by the system", 12);
        assert_eq!(lines, vec!["camera", "access was", "denied by", "the system"]);
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_keeps_paragraphs() {
        let lines = wrap_text("one\ntwo", 10);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_notice_rect_is_centered() {
        let lines = vec!["hello".to_string()];
        let rect = notice_rect(&lines, "Error", 80, 24);
        assert_eq!(rect.width, HINT.len() as u16 + 4);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.x, (80 - rect.width) / 2);
        assert_eq!(rect.y, (24 - 7) / 2);
    }

    #[test]
    fn test_render_notice_draws_border_and_text() {
        let mut out = Vec::new();
        render_notice(&mut out, "Camera error", "Permission denied", 80, 24).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('┌'));
        assert!(text.contains('┘'));
        assert!(text.contains("Camera error"));
        assert!(text.contains("Permission denied"));
        assert!(text.contains("Press any key"));
    }

    #[test]
    fn test_render_notice_tiny_screen_draws_nothing() {
        let mut out = Vec::new();
        render_notice(&mut out, "Error", "x", 3, 2).unwrap();
        assert!(out.is_empty());
    }
}
