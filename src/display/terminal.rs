//! Terminal draw surface — all terminal I/O lives here.
//!
//! Draw calls land in an in-memory cell grid; `present` pushes the grid to
//! the terminal in one batch of queued crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use super::{DrawSurface, ImageHandle, TextAlign, TextStyle, TextTone};
use crate::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Reset;
const C_TARGET: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_SHIP: Color = Color::White;
const C_EXPLOSION: Color = Color::Red;
const C_HUD: Color = Color::Red;
const C_TITLE: Color = Color::Red;
const C_BODY: Color = Color::Yellow;

fn glyph(image: ImageHandle) -> (char, Color) {
    match image {
        ImageHandle::Target => ('▓', C_TARGET),
        ImageHandle::Projectile => ('║', C_PROJECTILE),
        ImageHandle::Ship => ('█', C_SHIP),
        ImageHandle::Explosion => ('*', C_EXPLOSION),
    }
}

fn tone_color(tone: TextTone) -> Color {
    match tone {
        TextTone::Hud => C_HUD,
        TextTone::Title => C_TITLE,
        TextTone::Body => C_BODY,
    }
}

// ── Logical units ↔ cells ─────────────────────────────────────────────────────

/// Scales the logical viewport onto a `cols × rows` terminal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMapping {
    cols: u16,
    rows: u16,
    width: f32,
    height: f32,
}

impl CellMapping {
    pub fn new(cols: u16, rows: u16, width: f32, height: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            width,
            height,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn sx(&self) -> f32 {
        self.cols as f32 / self.width
    }

    fn sy(&self) -> f32 {
        self.rows as f32 / self.height
    }

    /// Logical x at the centre of a terminal column (pointer input).
    pub fn col_to_x(&self, col: u16) -> f32 {
        (col as f32 + 0.5) / self.sx()
    }

    pub fn x_to_col(&self, x: f32) -> i32 {
        (x * self.sx()).floor() as i32
    }

    pub fn y_to_row(&self, y: f32) -> i32 {
        (y * self.sy()).floor() as i32
    }

    /// Cells covered by `rect`, clipped to the grid, as half-open
    /// `(col_start, col_end, row_start, row_end)`.  Anything on screen
    /// covers at least one cell.
    pub fn cell_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let span = |start: f32, end: f32, scale: f32, limit: u16| -> Option<(u16, u16)> {
            let lo = (start * scale).floor() as i32;
            let hi = ((end * scale).ceil() as i32).max(lo + 1);
            let (lo, hi) = (lo.max(0), hi.min(limit as i32));
            (lo < hi).then_some((lo as u16, hi as u16))
        };
        let (c0, c1) = span(rect.x, rect.right(), self.sx(), self.cols)?;
        let (r0, r1) = span(rect.y, rect.bottom(), self.sy(), self.rows)?;
        Some((c0, c1, r0, r1))
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: C_BACKGROUND,
};

pub struct TerminalSurface {
    mapping: CellMapping,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(mapping: CellMapping) -> Self {
        let len = mapping.cols as usize * mapping.rows as usize;
        Self {
            mapping,
            cells: vec![BLANK; len],
        }
    }

    pub fn mapping(&self) -> &CellMapping {
        &self.mapping
    }

    /// Adopt a new terminal size; the logical viewport is unchanged.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(CellMapping::new(
            cols,
            rows,
            self.mapping.width,
            self.mapping.height,
        ));
    }

    /// Characters of one row with colour dropped.
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.mapping.rows {
            return String::new();
        }
        let cols = self.mapping.cols as usize;
        let start = row as usize * cols;
        self.cells[start..start + cols].iter().map(|c| c.ch).collect()
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.mapping.cols as i32 || row >= self.mapping.rows as i32 {
            return;
        }
        let index = row as usize * self.mapping.cols as usize + col as usize;
        self.cells[index] = cell;
    }

    /// Flush the whole grid, batching runs of same-coloured cells.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let cols = self.mapping.cols as usize;
        for (row, line) in self.cells.chunks(cols).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            let mut run = String::new();
            let mut run_color = None;
            for cell in line {
                if run_color != Some(cell.color) {
                    if let Some(color) = run_color {
                        out.queue(style::SetForegroundColor(color))?;
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    run_color = Some(cell.color);
                }
                run.push(cell.ch);
            }
            if let Some(color) = run_color {
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(&run))?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.mapping.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl DrawSurface for TerminalSurface {
    fn clear(&mut self, region: Rect) {
        if let Some((c0, c1, r0, r1)) = self.mapping.cell_span(&region) {
            for row in r0..r1 {
                for col in c0..c1 {
                    self.put(col as i32, row as i32, BLANK);
                }
            }
        }
    }

    fn draw_image(&mut self, image: ImageHandle, rect: Rect) {
        let (ch, color) = glyph(image);
        if let Some((c0, c1, r0, r1)) = self.mapping.cell_span(&rect) {
            for row in r0..r1 {
                for col in c0..c1 {
                    self.put(col as i32, row as i32, Cell { ch, color });
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let len = text.chars().count() as i32;
        let anchor = self.mapping.x_to_col(x);
        let start = match style.align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - len / 2,
            TextAlign::Right => anchor - len,
        };
        let row = self
            .mapping
            .y_to_row(y)
            .clamp(0, self.mapping.rows as i32 - 1);
        let color = tone_color(style.tone);
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, Cell { ch, color });
        }
    }
}
