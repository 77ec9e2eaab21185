//! Split-pane geometry for the dashboard.
//!
//! The terminal splits into a header row, a summary pane on the left, a
//! one-column separator, and the chart pane filling the rest. All rects
//! are recomputed from the terminal size on every resize; the chart's
//! bar layout is invalidated separately.

#![allow(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

/// Rows consumed by the header line.
pub const HEADER_ROWS: u16 = 1;
/// Rows consumed by the footer hint line.
pub const FOOTER_ROWS: u16 = 1;
/// Smallest terminal the dashboard will attempt to draw into.
pub const MIN_USABLE_COLS: u16 = 40;
pub const MIN_USABLE_ROWS: u16 = 10;

/// Axis-aligned cell rectangle in terminal coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl PaneRect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }

    /// Translate a terminal-global point into pane-local coordinates.
    #[must_use]
    pub const fn to_local(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        if self.contains(col, row) {
            Some((col - self.x, row - self.y))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The dashboard's split-pane arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panes {
    pub header: PaneRect,
    pub summary: PaneRect,
    pub chart: PaneRect,
    pub footer: PaneRect,
}

/// True when the terminal is too small to render anything useful.
#[must_use]
pub const fn is_terminal_too_small(cols: u16, rows: u16) -> bool {
    cols < MIN_USABLE_COLS || rows < MIN_USABLE_ROWS
}

/// Split the terminal into panes. `summary_split` is the summary pane's
/// share of the width (clamped to 0.1..=0.9 upstream by config
/// validation).
#[must_use]
pub fn build_panes(cols: u16, rows: u16, summary_split: f64) -> Panes {
    if is_terminal_too_small(cols, rows) {
        return Panes::default();
    }
    let body_rows = rows - HEADER_ROWS - FOOTER_ROWS;
    let summary_cols = (f64::from(cols) * summary_split) as u16;
    // One column of separator between the panes.
    let chart_x = summary_cols + 1;
    let chart_cols = cols.saturating_sub(chart_x);

    Panes {
        header: PaneRect::new(0, 0, cols, HEADER_ROWS),
        summary: PaneRect::new(0, HEADER_ROWS, summary_cols, body_rows),
        chart: PaneRect::new(chart_x, HEADER_ROWS, chart_cols, body_rows),
        footer: PaneRect::new(0, rows - FOOTER_ROWS, cols, FOOTER_ROWS),
    }
}
