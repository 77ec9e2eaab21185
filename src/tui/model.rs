//! Elm-style state model for the dashboard.
//!
//! All display state lives in [`AppModel`]. Input and data events arrive
//! as [`Msg`](super::update::Msg) values; side-effects are represented as
//! [`Cmd`](super::update::Cmd) values returned from the update function.
//! The model is deterministic and does no I/O, so every transition is
//! testable headlessly.

#![allow(missing_docs)]

use crate::chart::{Aggregate, ChartLayout, LayoutCache, LayoutParams, aggregate, layout};
use crate::core::config::Config;
use crate::model::Dataset;
use crate::tui::layout::{Panes, build_panes};
use crate::tui::theme::BAR_PALETTE;

/// Complete display state for the dashboard.
///
/// Single source of truth for the view layer: the update function
/// mutates it, the render function reads it immutably (except for the
/// layout cache, which refreshes lazily on paint).
#[derive(Debug)]
pub struct AppModel {
    /// Effective configuration.
    pub config: Config,
    /// Display name of the results source (shown in the header).
    pub source_label: String,
    /// Currently loaded dataset; replaced wholesale on reload.
    pub dataset: Dataset,
    /// Witness tallies derived from the dataset.
    pub aggregate: Aggregate,
    /// Cached chart geometry; `Stale` forces recompute on next paint.
    pub layout: LayoutCache,
    /// Terminal dimensions (columns, rows).
    pub terminal_size: (u16, u16),
    /// Horizontal scroll offset of the chart pane, in cells.
    pub chart_scroll: u16,
    /// Last pointer position in terminal coordinates.
    pub hover: Option<(u16, u16)>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Monotonic tick counter driven by the refresh timer.
    pub tick: u64,
    /// Number of datasets loaded so far (1 after startup).
    pub reload_count: u64,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl AppModel {
    #[must_use]
    pub fn new(config: Config, source_label: String, terminal_size: (u16, u16)) -> Self {
        let show_help = config.view.start_with_help;
        Self {
            config,
            source_label,
            dataset: Dataset::default(),
            aggregate: Aggregate::default(),
            layout: LayoutCache::Stale,
            terminal_size,
            chart_scroll: 0,
            hover: None,
            show_help,
            tick: 0,
            reload_count: 0,
            quit: false,
        }
    }

    /// Replace the dataset wholesale: re-aggregate and invalidate the
    /// cached layout.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.aggregate = aggregate(&dataset, self.config.chart.max_bars);
        self.dataset = dataset;
        self.layout.invalidate();
        self.reload_count += 1;
    }

    /// Record a terminal resize and invalidate the cached layout.
    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.terminal_size = (cols, rows);
        self.layout.invalidate();
        self.clamp_scroll();
    }

    /// Current split-pane arrangement for this terminal size.
    #[must_use]
    pub fn panes(&self) -> Panes {
        build_panes(
            self.terminal_size.0,
            self.terminal_size.1,
            self.config.view.summary_split,
        )
    }

    /// Refresh the layout cache if stale and return the chart geometry.
    pub fn ensure_layout(&mut self) -> &ChartLayout {
        let pane_height = self.panes().chart.height;
        let params = LayoutParams::from(&self.config.chart);
        let agg = &self.aggregate;
        self.layout
            .ensure(|| layout::compute(agg, &params, pane_height, BAR_PALETTE.len()))
    }

    /// Scroll the chart pane left by `step` cells.
    pub fn scroll_left(&mut self, step: u16) {
        self.chart_scroll = self.chart_scroll.saturating_sub(step);
    }

    /// Scroll the chart pane right by `step` cells, clamped so the end
    /// of the content stays reachable.
    pub fn scroll_right(&mut self, step: u16) {
        self.chart_scroll = self.chart_scroll.saturating_add(step);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let pane_width = self.panes().chart.width;
        let max = self
            .layout
            .get()
            .map_or(0, |l| l.preferred_width.saturating_sub(pane_width));
        self.chart_scroll = self.chart_scroll.min(max);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Tooltip for the current hover position.
    ///
    /// Reads the last computed layout only; returns `None` while the
    /// layout is stale, when the pointer is outside the chart pane, or
    /// when it misses every bar.
    #[must_use]
    pub fn tooltip(&self) -> Option<String> {
        let (col, row) = self.hover?;
        let layout = self.layout.get()?;
        let (local_col, local_row) = self.panes().chart.to_local(col, row)?;
        let content_col = local_col.checked_add(self.chart_scroll)?;
        layout
            .hit_test(content_col, local_row)
            .map(ToOwned::to_owned)
    }
}
