//! Render surface for the dashboard.
//!
//! Two entrypoints:
//! - `render_canvas()` / `render_to_string()` — headless cell-grid
//!   rendering used by tests and the harness that asserts on content.
//! - `paint()` — replays the same canvas through crossterm (the
//!   production path), so both paths share one geometry.

#![allow(missing_docs)]
#![allow(clippy::too_many_lines)]

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::tui::layout::{MIN_USABLE_COLS, MIN_USABLE_ROWS, PaneRect, is_terminal_too_small};
use crate::tui::model::AppModel;
use crate::tui::theme::{FOREGROUND, HELP_BG, HELP_FG, MUTED, Theme};
use crate::tui::widgets::Canvas;

/// Rows the summary pane spends on its own heading.
const SUMMARY_HEADING_ROWS: u16 = 2;

/// Build the help overlay text for the configured bar limit.
fn help_lines(max_bars: usize) -> Vec<String> {
    vec![
        "This view shows the distribution of witnesses per test case.".to_owned(),
        format!("For each test case the top {max_bars} witnesses are shown;"),
        "bar height is proportional to the witness frequency.".to_owned(),
        "Hover over a bar to see its witness name.".to_owned(),
        String::new(),
        "q quit   ? help   r reload   \u{2190}/\u{2192} scroll".to_owned(),
    ]
}

/// Render the whole dashboard into a cell canvas.
///
/// Takes `&mut` because repaint refreshes the layout cache when it has
/// been invalidated by a resize or data change.
#[must_use]
pub fn render_canvas(model: &mut AppModel, theme: Theme) -> Canvas {
    let (cols, rows) = model.terminal_size;
    let mut canvas = Canvas::new(cols, rows);

    if is_terminal_too_small(cols, rows) {
        canvas.text(
            0,
            0,
            &format!("terminal too small: need >= {MIN_USABLE_COLS}x{MIN_USABLE_ROWS}, got {cols}x{rows}"),
            FOREGROUND,
        );
        return canvas;
    }

    let panes = model.panes();
    draw_header(model, &mut canvas, panes.header);
    draw_summary(model, &mut canvas, panes.summary);
    canvas.vline(
        panes.chart.x.saturating_sub(1),
        panes.chart.y,
        panes.chart.height,
        MUTED,
    );
    draw_chart(model, &mut canvas, panes.chart, theme);
    draw_footer(&mut canvas, panes.footer);

    if let Some(witness) = model.tooltip() {
        draw_tooltip(&mut canvas, model.hover, &witness);
    }
    if model.show_help {
        draw_help(model, &mut canvas, panes.chart);
    }
    canvas
}

/// Headless render to plain text (color dropped), for tests.
#[must_use]
pub fn render_to_string(model: &mut AppModel) -> String {
    render_canvas(model, Theme::from_no_color_flag(true)).to_text()
}

/// Replay a freshly rendered canvas through crossterm.
pub fn paint(out: &mut impl Write, model: &mut AppModel, theme: Theme) -> io::Result<()> {
    let canvas = render_canvas(model, theme);
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    let mut fg = Color::Reset;
    let mut bg: Option<Color> = None;
    for row in 0..canvas.height() {
        queue!(out, MoveTo(0, row))?;
        for col in 0..canvas.width() {
            let Some(cell) = canvas.cell(col, row) else {
                continue;
            };
            if cell.fg != fg {
                queue!(out, SetForegroundColor(cell.fg))?;
                fg = cell.fg;
            }
            if cell.bg != bg {
                match cell.bg {
                    Some(color) => queue!(out, SetBackgroundColor(color))?,
                    None => queue!(out, ResetColor, SetForegroundColor(fg))?,
                }
                bg = cell.bg;
            }
            write!(out, "{}", cell.glyph)?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

// ──────────────────── panes ────────────────────

fn draw_header(model: &AppModel, canvas: &mut Canvas, pane: PaneRect) {
    let skipped = model.dataset.skipped_lines();
    let skipped_note = if skipped > 0 {
        format!("  skipped={skipped}")
    } else {
        String::new()
    };
    let header = format!(
        " wviz  [{}]  tests={} cases={}{}  tick={}",
        model.source_label,
        model.dataset.test_count(),
        model.dataset.case_count(),
        skipped_note,
        model.tick,
    );
    canvas.text(pane.x, pane.y, &header, FOREGROUND);
}

fn draw_summary(model: &AppModel, canvas: &mut Canvas, pane: PaneRect) {
    if pane.is_empty() {
        return;
    }
    canvas.text(pane.x + 1, pane.y, "Tests", FOREGROUND);
    if model.dataset.is_empty() {
        canvas.text(pane.x + 1, pane.y + SUMMARY_HEADING_ROWS, "(no data)", MUTED);
        return;
    }

    let visible_rows = pane.height.saturating_sub(SUMMARY_HEADING_ROWS);
    let name_width = usize::from(pane.width.saturating_sub(12));
    for (i, test_name) in model.dataset.test_names().enumerate() {
        let Ok(row_offset) = u16::try_from(i) else {
            break;
        };
        if row_offset >= visible_rows {
            canvas.text(
                pane.x + 1,
                pane.y + SUMMARY_HEADING_ROWS + visible_rows.saturating_sub(1),
                "…",
                MUTED,
            );
            break;
        }
        let (passed, failed) = model.dataset.outcome_totals(test_name);
        let mut name: String = test_name.chars().take(name_width.max(1)).collect();
        if name.len() < test_name.len() {
            name.push('…');
        }
        let line = format!("{name:<name_width$} {passed:>3}\u{2713} {failed:>3}\u{2717}");
        canvas.text(pane.x + 1, pane.y + SUMMARY_HEADING_ROWS + row_offset, &line, FOREGROUND);
    }
}

fn draw_chart(model: &mut AppModel, canvas: &mut Canvas, pane: PaneRect, theme: Theme) {
    if pane.is_empty() {
        return;
    }
    let scroll = model.chart_scroll;
    let layout = model.ensure_layout().clone();

    if layout.bars.is_empty() {
        canvas.text(pane.x + 1, pane.y + 1, "(no failing witnesses)", MUTED);
        return;
    }

    for bar in &layout.bars {
        // Intersect the bar with the scrolled viewport before painting.
        let start = bar.x.max(scroll);
        let end = bar
            .x
            .saturating_add(bar.width)
            .min(scroll.saturating_add(pane.width));
        if start >= end {
            continue;
        }
        let visible_height = bar.height.min(pane.height.saturating_sub(bar.y));
        canvas.fill_rect(
            pane.x + (start - scroll),
            pane.y + bar.y,
            end - start,
            visible_height,
            theme.bar_color(bar.color_index),
        );
    }

    for label in &layout.labels {
        for (i, glyph) in label.test_name.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            let content_col = label.anchor_x.saturating_add(offset);
            let row = label.anchor_y.saturating_add(offset);
            if row >= pane.height {
                break;
            }
            if let Some(screen_col) = screen_col(pane, scroll, content_col) {
                canvas.put(screen_col, pane.y + row, glyph, FOREGROUND);
            }
        }
    }

    // Scroll indicators when content is clipped.
    if scroll > 0 {
        canvas.put(pane.x, pane.y, '\u{25c0}', MUTED);
    }
    if layout.preferred_width > scroll + pane.width {
        canvas.put(pane.x + pane.width - 1, pane.y, '\u{25b6}', MUTED);
    }
}

/// Content column → screen column under the current scroll, clipped to
/// the chart pane.
fn screen_col(pane: PaneRect, scroll: u16, content_col: u16) -> Option<u16> {
    let visible = content_col.checked_sub(scroll)?;
    (visible < pane.width).then(|| pane.x + visible)
}

fn draw_footer(canvas: &mut Canvas, pane: PaneRect) {
    let hints = " q quit   ? help   r reload   \u{2190}/\u{2192} scroll";
    canvas.text(pane.x, pane.y, hints, MUTED);
}

fn draw_tooltip(canvas: &mut Canvas, hover: Option<(u16, u16)>, witness: &str) {
    let Some((col, row)) = hover else { return };
    // Witness strings come straight from the results file and are
    // unbounded; clamp the box to the canvas.
    let width = u16::try_from(witness.chars().count().saturating_add(4))
        .unwrap_or(u16::MAX)
        .min(canvas.width());
    let height = 3;
    // Prefer below-right of the pointer; flip up/left at the edges.
    let x = if col.saturating_add(1).saturating_add(width) <= canvas.width() {
        col + 1
    } else {
        canvas.width().saturating_sub(width)
    };
    let y = if row.saturating_add(1 + height) <= canvas.height() {
        row + 1
    } else {
        row.saturating_sub(height)
    };
    canvas.boxed(x, y, width, height, HELP_FG, HELP_BG);
    for (i, glyph) in witness.chars().enumerate() {
        let Some(text_col) = u16::try_from(i)
            .ok()
            .and_then(|offset| x.checked_add(2)?.checked_add(offset))
        else {
            break;
        };
        // Keep the text inside the box border.
        if text_col >= x.saturating_add(width).saturating_sub(2) {
            break;
        }
        canvas.put_bg(text_col, y + 1, glyph, HELP_FG, HELP_BG);
    }
}

fn draw_help(model: &AppModel, canvas: &mut Canvas, chart: PaneRect) {
    let lines = help_lines(model.config.chart.max_bars);
    let inner_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = u16::try_from(inner_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    // Top-right corner of the chart area, like the canonical help box.
    let x = (chart.x + chart.width).saturating_sub(width + 1);
    let y = chart.y;
    canvas.boxed(x, y, width, height, HELP_FG, HELP_BG);
    for (i, line) in lines.iter().enumerate() {
        let Ok(offset) = u16::try_from(i) else { break };
        for (j, glyph) in line.chars().enumerate() {
            let Ok(col_offset) = u16::try_from(j) else {
                break;
            };
            canvas.put_bg(x + 2 + col_offset, y + 1 + offset, glyph, HELP_FG, HELP_BG);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::model::{Dataset, TestCase};

    fn t1_model() -> AppModel {
        let mut cases = Vec::new();
        for (witness, n) in [("A", 10u32), ("B", 5), ("C", 1)] {
            for _ in 0..n {
                cases.push(TestCase {
                    test_name: "T1".to_owned(),
                    passed: false,
                    witness: witness.to_owned(),
                });
            }
        }
        let mut model = AppModel::new(Config::default(), "results.jsonl".to_owned(), (100, 30));
        model.set_dataset(Dataset::from_cases(cases));
        model
    }

    #[test]
    fn header_names_the_source_and_counts() {
        let mut model = t1_model();
        let text = render_to_string(&mut model);
        let header = text.lines().next().unwrap();
        assert!(header.contains("[results.jsonl]"));
        assert!(header.contains("tests=1"));
        assert!(header.contains("cases=16"));
    }

    #[test]
    fn bars_are_drawn_in_the_chart_pane() {
        let mut model = t1_model();
        let theme = Theme::from_no_color_flag(false);
        let canvas = render_canvas(&mut model, theme);
        let chart = model.panes().chart;
        // Bar A occupies content x 2..4 from row 0 of the chart pane.
        assert_eq!(canvas.glyph_at(chart.x + 2, chart.y), '█');
        // Each bar keeps its palette color.
        assert_eq!(
            canvas.cell(chart.x + 2, chart.y).unwrap().fg,
            theme.bar_color(0)
        );
        // Gap column between bars stays empty.
        assert_eq!(canvas.glyph_at(chart.x + 4, chart.y), ' ');
    }

    #[test]
    fn label_runs_diagonally_below_the_baseline() {
        let mut model = t1_model();
        let canvas = render_canvas(&mut model, Theme::from_no_color_flag(true));
        let chart = model.panes().chart;
        let layout = model.ensure_layout().clone();
        let label = &layout.labels[0];
        assert_eq!(
            canvas.glyph_at(chart.x + label.anchor_x, chart.y + label.anchor_y),
            'T'
        );
        assert_eq!(
            canvas.glyph_at(chart.x + label.anchor_x + 1, chart.y + label.anchor_y + 1),
            '1'
        );
    }

    #[test]
    fn summary_lists_pass_fail_totals() {
        let mut model = t1_model();
        let text = render_to_string(&mut model);
        assert!(text.contains("T1"));
        assert!(text.contains("0\u{2713}"));
        assert!(text.contains("16\u{2717}"));
    }

    #[test]
    fn empty_dataset_renders_placeholders() {
        let mut model = AppModel::new(Config::default(), "r.jsonl".to_owned(), (100, 30));
        let text = render_to_string(&mut model);
        assert!(text.contains("(no data)"));
        assert!(text.contains("(no failing witnesses)"));
    }

    #[test]
    fn help_overlay_appears_when_toggled() {
        let mut model = t1_model();
        let before = render_to_string(&mut model);
        assert!(!before.contains("distribution of witnesses"));
        model.toggle_help();
        let after = render_to_string(&mut model);
        assert!(after.contains("distribution of witnesses"));
        assert!(after.contains("top 5 witnesses"));
    }

    #[test]
    fn tooltip_shows_witness_under_pointer() {
        let mut model = t1_model();
        model.ensure_layout();
        let chart = model.panes().chart;
        model.hover = Some((chart.x + 2, chart.y + 1));
        let text = render_to_string(&mut model);
        assert!(text.contains('A'));
        // The tooltip box border is present near the pointer.
        let canvas = render_canvas(&mut model, Theme::from_no_color_flag(true));
        assert_eq!(canvas.glyph_at(chart.x + 3, chart.y + 2), '┌');
    }

    #[test]
    fn tooltip_with_very_long_witness_stays_in_bounds() {
        let mut cases = Vec::new();
        for _ in 0..3 {
            cases.push(TestCase {
                test_name: "T1".to_owned(),
                passed: false,
                witness: "w".repeat(65_531),
            });
        }
        let mut model = AppModel::new(Config::default(), "r.jsonl".to_owned(), (100, 30));
        model.set_dataset(Dataset::from_cases(cases));
        model.ensure_layout();
        let chart = model.panes().chart;
        model.hover = Some((chart.x + 2, chart.y));

        // Must not overflow; the box clamps to the canvas width.
        let canvas = render_canvas(&mut model, Theme::from_no_color_flag(true));
        assert_eq!(canvas.glyph_at(0, chart.y + 1), '┌');
        assert_eq!(canvas.glyph_at(canvas.width() - 1, chart.y + 1), '┐');
    }

    #[test]
    fn scrolled_bars_clip_at_the_pane_edge() {
        let mut model = t1_model();
        model.ensure_layout();
        // Bar A spans content cols 2..4; scrolled by 3 only its right
        // half remains, flush against the pane edge.
        model.chart_scroll = 3;
        let canvas = render_canvas(&mut model, Theme::from_no_color_flag(true));
        let chart = model.panes().chart;
        assert_eq!(canvas.glyph_at(chart.x, chart.y + 1), '█');
        // Content col 4 is the gap after bar A.
        assert_eq!(canvas.glyph_at(chart.x + 1, chart.y + 1), ' ');
        // Left scroll indicator appears once content is clipped off.
        assert_eq!(canvas.glyph_at(chart.x, chart.y), '\u{25c0}');
    }

    #[test]
    fn too_small_terminal_renders_notice() {
        let mut model = t1_model();
        model.on_resize(20, 5);
        let text = render_to_string(&mut model);
        assert!(text.contains("terminal too small"));
    }

    #[test]
    fn repaint_reuses_cached_layout_until_resize() {
        let mut model = t1_model();
        let _ = render_to_string(&mut model);
        assert!(model.layout.is_fresh());
        let _ = render_to_string(&mut model);
        assert!(model.layout.is_fresh());
        model.on_resize(90, 28);
        assert!(!model.layout.is_fresh());
        let _ = render_to_string(&mut model);
        assert!(model.layout.is_fresh());
    }

    #[test]
    fn paint_writes_ansi_without_error() {
        let mut model = t1_model();
        let mut sink = Vec::new();
        paint(&mut sink, &mut model, Theme::from_no_color_flag(false)).unwrap();
        assert!(!sink.is_empty());
    }
}
