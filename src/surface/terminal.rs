//! Status bar drawn on the top row of a terminal.
//!
//! The bar occupies the rightmost `bar_width` columns. Its left part is taken
//! by the foreground application's menus; status items fill the rest from the
//! right edge, primary item first. An item that does not fit entirely is
//! pushed off screen, the same way a crowded menu bar hides status items.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::terminal::size as terminal_size;

use super::visibility::{frame_is_visible, Point, Rect};
use super::{DisplaySurface, ICON_WIDTH};
use crate::log_debug;
use crate::text::display_width;

const SAVE_CURSOR: &[u8] = b"\x1b[s\x1b7";
const RESTORE_CURSOR: &[u8] = b"\x1b[u\x1b8";
const ICON: &str = "♫ ";
const APP_MENUS_LABEL: &str = " File Edit View";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Lyricbar,
    ForegroundApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    start: usize,
    width: usize,
}

#[derive(Debug, Default)]
struct Layout {
    primary: Option<Slot>,
    secondary: Option<Slot>,
}

pub struct TerminalSurface<W: Write = io::Stdout> {
    out: W,
    rows: u16,
    cols: u16,
    bar_width: usize,
    reserved_cols: usize,
    primary_text: Option<String>,
    secondary_text: Option<String>,
}

impl TerminalSurface<io::Stdout> {
    /// Surface on stdout sized to the current terminal.
    pub fn stdout(bar_width: u16, reserved_cols: u16) -> Result<Self> {
        let (cols, rows) = terminal_size().context("failed to read terminal size")?;
        Ok(Self::new(io::stdout(), cols, rows, bar_width, reserved_cols))
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, bar_width: u16, reserved_cols: u16) -> Self {
        Self {
            out,
            rows,
            cols,
            bar_width: bar_width as usize,
            reserved_cols: reserved_cols as usize,
            primary_text: None,
            secondary_text: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.redraw();
    }

    /// Erase the bar row, e.g. on shutdown.
    pub fn clear(&mut self) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }
        let mut sequence = Vec::new();
        sequence.extend_from_slice(SAVE_CURSOR);
        sequence.extend_from_slice(b"\x1b[1;1H\x1b[2K");
        sequence.extend_from_slice(RESTORE_CURSOR);
        self.write_sequence(&sequence);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn effective_width(&self) -> usize {
        self.bar_width.min(self.cols as usize)
    }

    fn origin(&self) -> usize {
        (self.cols as usize).saturating_sub(self.effective_width())
    }

    fn primary_width(&self) -> usize {
        self.primary_text
            .as_deref()
            .map(display_width)
            .unwrap_or(ICON_WIDTH)
    }

    fn layout(&self) -> Layout {
        let width = self.effective_width();
        let mut free = width.saturating_sub(self.reserved_cols);
        let mut right = width;
        let mut place = |item_width: usize| {
            if item_width > free {
                return None;
            }
            free -= item_width;
            right -= item_width;
            Some(Slot {
                start: right,
                width: item_width,
            })
        };
        let primary = place(self.primary_width());
        let secondary = self.secondary_text.as_deref().and_then(|text| place(display_width(text)));
        Layout { primary, secondary }
    }

    /// Primary item frame in bottom-left-origin coordinates. Hidden items sit left of the screen.
    fn primary_frame(&self, layout: &Layout) -> Rect {
        let y = f64::from(self.rows) - 1.0;
        match layout.primary {
            Some(slot) => Rect::new((self.origin() + slot.start) as f64, y, slot.width as f64, 1.0),
            None => {
                let width = self.primary_width() as f64;
                Rect::new(-width, y, width, 1.0)
            }
        }
    }

    fn occupant_at(&self, layout: &Layout, point: Point) -> Option<Occupant> {
        if point.y < 0.0 || point.y >= 1.0 || point.x < 0.0 {
            return None;
        }
        let col = (point.x as usize).checked_sub(self.origin())?;
        if col >= self.effective_width() {
            return None;
        }
        if col < self.reserved_cols {
            return Some(Occupant::ForegroundApp);
        }
        [layout.primary, layout.secondary]
            .into_iter()
            .flatten()
            .any(|slot| (slot.start..slot.start + slot.width).contains(&col))
            .then_some(Occupant::Lyricbar)
    }

    fn compose_row(&self, layout: &Layout) -> String {
        let width = self.effective_width();
        let mut cells: Vec<String> = vec![" ".to_string(); width];
        for (idx, ch) in APP_MENUS_LABEL.chars().take(self.reserved_cols.min(width)).enumerate() {
            cells[idx] = ch.to_string();
        }
        let primary = self.primary_text.as_deref().unwrap_or(ICON);
        let items = [
            (layout.primary, Some(primary)),
            (layout.secondary, self.secondary_text.as_deref()),
        ];
        for (slot, text) in items {
            let (Some(slot), Some(text)) = (slot, text) else {
                continue;
            };
            let mut col = slot.start;
            for ch in text.chars() {
                let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
                if ch_width == 0 {
                    continue;
                }
                if col + ch_width > slot.start + slot.width {
                    break;
                }
                cells[col] = ch.to_string();
                for pad in 1..ch_width {
                    cells[col + pad].clear();
                }
                col += ch_width;
            }
        }
        cells.concat()
    }

    fn redraw(&mut self) {
        if self.rows == 0 || self.cols == 0 || self.effective_width() == 0 {
            return;
        }
        let layout = self.layout();
        let row = self.compose_row(&layout);
        let mut sequence = Vec::new();
        sequence.extend_from_slice(SAVE_CURSOR);
        sequence.extend_from_slice(format!("\x1b[1;{}H", self.origin() + 1).as_bytes());
        sequence.extend_from_slice(row.as_bytes());
        sequence.extend_from_slice(RESTORE_CURSOR);
        self.write_sequence(&sequence);
    }

    fn write_sequence(&mut self, sequence: &[u8]) {
        if let Err(err) = self.out.write_all(sequence) {
            log_debug(&format!("status bar write failed: {err}"));
            return;
        }
        if let Err(err) = self.out.flush() {
            log_debug(&format!("status bar flush failed: {err}"));
        }
    }
}

/// Strip escape sequences and replace control characters so text cannot move the cursor.
fn sanitize_status(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn set_icon(&mut self) {
        self.primary_text = None;
        self.redraw();
    }

    fn set_text(&mut self, text: &str) {
        self.primary_text = Some(sanitize_status(text));
        self.redraw();
    }

    fn show_secondary(&mut self, text: &str) {
        self.secondary_text = Some(sanitize_status(text));
        self.redraw();
    }

    fn release_secondary(&mut self) {
        if self.secondary_text.take().is_some() {
            self.redraw();
        }
    }

    fn query_visible(&mut self) -> bool {
        let layout = self.layout();
        let frame = self.primary_frame(&layout);
        let screen = Rect::new(0.0, 0.0, f64::from(self.cols), f64::from(self.rows));
        frame_is_visible(
            Some(frame),
            &[screen],
            |point| self.occupant_at(&layout, point),
            &Occupant::Lyricbar,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(bar_width: u16, reserved: u16) -> TerminalSurface<Vec<u8>> {
        TerminalSurface::new(Vec::new(), 40, 10, bar_width, reserved)
    }

    #[test]
    fn sanitize_strips_escapes_and_controls() {
        assert_eq!(sanitize_status("\x1b[31mred\x1b[0m\tline\n"), "red line ");
        assert_eq!(sanitize_status("日出"), "日出");
    }

    #[test]
    fn icon_is_visible_when_bar_has_room() {
        let mut s = surface(10, 4);
        s.set_icon();
        assert!(s.query_visible());
    }

    #[test]
    fn text_visible_only_within_free_columns() {
        let mut s = surface(12, 4);
        s.set_text("12345678");
        assert!(s.query_visible());
        s.set_text("123456789");
        assert!(!s.query_visible());
    }

    #[test]
    fn secondary_does_not_steal_primary_space() {
        let mut s = surface(12, 2);
        s.set_icon();
        s.show_secondary("a long lyric line");
        assert!(s.query_visible());
    }

    #[test]
    fn reserved_columns_reduce_capacity() {
        let mut s = surface(12, 0);
        s.set_text("123456789012");
        assert!(s.query_visible());
        let mut s = surface(12, 1);
        s.set_text("123456789012");
        assert!(!s.query_visible());
    }

    #[test]
    fn bar_narrower_terminal_clamps_width() {
        let mut s = TerminalSurface::new(Vec::new(), 6, 10, 12, 0);
        s.set_text("123456");
        assert!(s.query_visible());
        s.set_text("1234567");
        assert!(!s.query_visible());
    }

    #[test]
    fn redraw_positions_bar_on_top_row() {
        let mut s = surface(10, 0);
        s.set_text("hi");
        let out = String::from_utf8(s.into_inner()).expect("utf8 output");
        assert!(out.contains("\x1b[1;31H"));
        assert!(out.ends_with("        hi\x1b[u\x1b8"));
    }

    #[test]
    fn wide_characters_fill_two_columns() {
        let mut s = surface(6, 0);
        s.set_text("日出");
        assert!(s.query_visible());
        let out = String::from_utf8(s.into_inner()).expect("utf8 output");
        assert!(out.contains("  日出\x1b[u"));
    }

    #[test]
    fn zero_sized_terminal_draws_nothing() {
        let mut s = TerminalSurface::new(Vec::new(), 0, 0, 10, 0);
        s.set_text("hi");
        s.clear();
        assert!(s.into_inner().is_empty());
    }
}
