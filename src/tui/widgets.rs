//! Cell canvas and drawing primitives shared by the headless and
//! terminal render paths.
//!
//! The canvas is a plain grid of (char, color) cells. The headless
//! renderer flattens it to text for assertions; the terminal renderer
//! replays it through crossterm. Keeping all drawing on this surface
//! means the two paths can never disagree about geometry.

#![allow(missing_docs)]

use crossterm::style::Color;

/// One drawable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Color::Reset,
            bg: None,
        }
    }
}

/// A width × height grid of cells, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.width && row < self.height)
            .then(|| usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    /// Write one cell; out-of-bounds writes are clipped silently.
    pub fn put(&mut self, col: u16, row: u16, glyph: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].glyph = glyph;
            self.cells[i].fg = fg;
        }
    }

    /// Write one cell with an explicit background.
    pub fn put_bg(&mut self, col: u16, row: u16, glyph: char, fg: Color, bg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell {
                glyph,
                fg,
                bg: Some(bg),
            };
        }
    }

    #[must_use]
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    #[must_use]
    pub fn glyph_at(&self, col: u16, row: u16) -> char {
        self.cell(col, row).map_or(' ', |c| c.glyph)
    }

    /// Horizontal text run, clipped at the right edge.
    pub fn text(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (i, glyph) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            self.put(col.saturating_add(offset), row, glyph, fg);
        }
    }

    /// Solid block column used for bars: fills `[x, x+width) × [y, y+height)`.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, fg: Color) {
        for row in y..y.saturating_add(height) {
            for col in x..x.saturating_add(width) {
                self.put(col, row, '█', fg);
            }
        }
    }

    /// Vertical separator line.
    pub fn vline(&mut self, col: u16, y: u16, height: u16, fg: Color) {
        for row in y..y.saturating_add(height) {
            self.put(col, row, '│', fg);
        }
    }

    /// Bordered box filled with a background color (tooltips, help).
    pub fn boxed(&mut self, x: u16, y: u16, width: u16, height: u16, fg: Color, bg: Color) {
        if width < 2 || height < 2 {
            return;
        }
        for row in y..y + height {
            for col in x..x + width {
                let glyph = match (row == y, row == y + height - 1, col == x, col == x + width - 1)
                {
                    (true, _, true, _) => '┌',
                    (true, _, _, true) => '┐',
                    (_, true, true, _) => '└',
                    (_, true, _, true) => '┘',
                    (true, ..) | (_, true, ..) => '─',
                    (_, _, true, _) | (_, _, _, true) => '│',
                    _ => ' ',
                };
                self.put_bg(col, row, glyph, fg, bg);
            }
        }
    }

    /// Flatten to newline-joined rows, trailing spaces trimmed per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in 0..self.height {
            let mut line = String::with_capacity(usize::from(self.width));
            for col in 0..self.width {
                line.push(self.glyph_at(col, row));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
