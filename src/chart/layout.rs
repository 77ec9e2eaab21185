//! Bar and label layout for the results chart, plus hit-testing.
//!
//! Geometry is computed in terminal cell coordinates (x grows right,
//! y grows down, origin at the chart pane's top-left). The vertical
//! budget splits into the bar region and a reserved strip underneath for
//! test-name labels drawn diagonally (one cell down-right per character,
//! approximating the 60°-rotated labels of a pixel canvas — the reserved
//! height is still modeled as `sqrt(3)/2 × text width`).
//!
//! Layout is cached and explicitly invalidated on resize or data change;
//! [`LayoutCache`] makes the stale/fresh distinction a type instead of a
//! null sentinel.

#![allow(missing_docs)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::chart::aggregate::Aggregate;
use crate::core::config::ChartConfig;

/// Geometry knobs, lifted out of [`ChartConfig`] so layout code never
/// touches the full config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub bar_width: u16,
    pub bar_spacing: u16,
    pub group_spacing: u16,
    pub padding_x: u16,
    pub padding_y: u16,
}

impl From<&ChartConfig> for LayoutParams {
    fn from(chart: &ChartConfig) -> Self {
        Self {
            bar_width: chart.bar_width,
            bar_spacing: chart.bar_spacing,
            group_spacing: chart.group_spacing,
            padding_x: chart.padding_x,
            padding_y: chart.padding_y,
        }
    }
}

/// One positioned bar. `y` is the top edge; the bar occupies
/// `[x, x+width) × [y, y+height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Palette slot (`q % palette_len` within the group).
    pub color_index: usize,
    /// Witness this bar represents, returned by hit-testing.
    pub witness: String,
}

impl Bar {
    /// Half-open rectangle containment, matching how cells are painted.
    #[must_use]
    pub const fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }
}

/// Anchor for one test-case group label, centered under the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLabel {
    pub test_name: String,
    pub anchor_x: u16,
    pub anchor_y: u16,
}

/// Fully computed chart geometry for one pane size + aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartLayout {
    /// Bars in insertion order: group by group, tallest-first within each.
    pub bars: Vec<Bar>,
    /// One label per non-empty group.
    pub labels: Vec<GroupLabel>,
    /// Content size the pane would need to show everything unclipped;
    /// the view scrolls horizontally when this exceeds the pane width.
    pub preferred_width: u16,
    pub preferred_height: u16,
    /// Row just below the lowest bar cell (labels start here).
    pub baseline: u16,
}

impl ChartLayout {
    /// First bar containing the point, in insertion order.
    ///
    /// Returns the bar's witness name, or `None` when the point is
    /// outside every bar. O(bars) per query.
    #[must_use]
    pub fn hit_test(&self, col: u16, row: u16) -> Option<&str> {
        self.bars
            .iter()
            .find(|bar| bar.contains(col, row))
            .map(|bar| bar.witness.as_str())
    }
}

/// Diagonal label footprint height for a label of `text_width` cells,
/// modeling a 60° rotation: `ceil(sqrt(3)/2 × width)`.
#[must_use]
pub fn label_footprint_height(text_width: u16) -> u16 {
    (f32::from(text_width) * 3f32.sqrt() / 2.0).ceil() as u16
}

/// Clamp an i32 cell coordinate into the u16 cell range. The horizontal
/// cursor can exceed `u16::MAX` with enough groups; far-right geometry
/// pins to the edge instead of wrapping.
fn to_cell(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}

/// Vertical strip reserved for labels: a third of the pane at most, and
/// never more than the tallest label needs.
fn reserved_text_height(pane_height: u16, padding_y: u16, max_label_height: u16) -> u16 {
    (pane_height.saturating_sub(padding_y) / 3).min(max_label_height)
}

/// Compute bar rectangles and label anchors for the given pane size.
///
/// Groups with zero failing witnesses are skipped entirely: they get no
/// bars, no label, and no horizontal space, so the per-group scale
/// factor is never computed against a zero maximum.
#[must_use]
pub fn compute(
    agg: &Aggregate,
    params: &LayoutParams,
    pane_height: u16,
    palette_len: usize,
) -> ChartLayout {
    debug_assert!(palette_len > 0);

    let height = i32::from(pane_height) - 2 * i32::from(params.padding_y);

    let max_label = agg
        .non_empty()
        .map(|tally| label_footprint_height(tally.test_name.chars().count() as u16))
        .max()
        .unwrap_or(0);
    let reserved = i32::from(reserved_text_height(pane_height, params.padding_y, max_label));

    let baseline = height - 1 - reserved + i32::from(params.padding_y);
    let bar_budget = height - reserved;
    if baseline < 0 || bar_budget <= 0 || agg.non_empty().count() == 0 {
        return ChartLayout::default();
    }

    let mut bars = Vec::new();
    let mut labels = Vec::new();
    let mut x = i32::from(params.padding_x);
    let step = i32::from(params.bar_width) + i32::from(params.bar_spacing);

    for tally in agg.non_empty() {
        let group_start = x;
        // Non-empty group, so max_count >= 1.
        let scale = bar_budget as f32 / tally.max_count() as f32;
        for (q, (witness, count)) in tally.witnesses.iter().enumerate() {
            let bar_height = (*count as f32 * scale) as i32;
            bars.push(Bar {
                x: to_cell(x),
                y: to_cell(baseline - bar_height),
                width: params.bar_width,
                height: to_cell(bar_height),
                color_index: q % palette_len,
                witness: witness.clone(),
            });
            x += step;
        }
        let group_width = tally.witnesses.len() as i32 * step;
        labels.push(GroupLabel {
            test_name: tally.test_name.clone(),
            anchor_x: to_cell(group_start + group_width / 2),
            anchor_y: to_cell(baseline),
        });
        x += i32::from(params.group_spacing);
    }

    // Diagonal labels run right by one cell per row of height, so the
    // content extends past the last group by the reserved strip.
    ChartLayout {
        bars,
        labels,
        preferred_width: to_cell(x + i32::from(params.padding_x) + reserved),
        preferred_height: to_cell(baseline + reserved),
        baseline: to_cell(baseline),
    }
}

// ──────────────────── layout cache ────────────────────

/// Cached layout with an explicit staleness state.
///
/// `Stale` after a resize or data change; the next paint recomputes.
/// All other repaints reuse the `Fresh` value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LayoutCache {
    #[default]
    Stale,
    Fresh(ChartLayout),
}

impl LayoutCache {
    /// Mark the cached layout stale (resize or new data).
    pub fn invalidate(&mut self) {
        *self = Self::Stale;
    }

    /// The cached layout, if still fresh.
    #[must_use]
    pub const fn get(&self) -> Option<&ChartLayout> {
        match self {
            Self::Stale => None,
            Self::Fresh(layout) => Some(layout),
        }
    }

    /// Return the cached layout, computing it first when stale.
    pub fn ensure(&mut self, compute: impl FnOnce() -> ChartLayout) -> &ChartLayout {
        if matches!(self, Self::Stale) {
            *self = Self::Fresh(compute());
        }
        match self {
            Self::Fresh(layout) => layout,
            Self::Stale => unreachable!("cache was just refreshed"),
        }
    }

    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::aggregate::aggregate;
    use crate::model::{Dataset, TestCase};

    const PALETTE_LEN: usize = 5;

    fn params() -> LayoutParams {
        LayoutParams::from(&ChartConfig::default())
    }

    fn failing<'a>(test: &'a str, witness: &'a str, n: u32) -> impl Iterator<Item = TestCase> + 'a {
        (0..n).map(move |_| TestCase {
            test_name: test.to_owned(),
            passed: false,
            witness: witness.to_owned(),
        })
    }

    fn t1_aggregate() -> Aggregate {
        // Spec worked example: T1 = {A:10, B:5, C:1}.
        let mut cases: Vec<TestCase> = failing("T1", "A", 10).collect();
        cases.extend(failing("T1", "B", 5));
        cases.extend(failing("T1", "C", 1));
        aggregate(&Dataset::from_cases(cases), 5)
    }

    #[test]
    fn label_footprint_matches_sixty_degree_model() {
        assert_eq!(label_footprint_height(0), 0);
        assert_eq!(label_footprint_height(2), 2); // ceil(1.73)
        assert_eq!(label_footprint_height(10), 9); // ceil(8.66)
    }

    #[test]
    fn t1_bar_heights_are_proportional() {
        // pane 24 rows, pad_y 1: height 22, label "T1" reserves 2 rows,
        // bar budget 20, scale 20/10 = 2.0 exactly.
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        let heights: Vec<u16> = layout.bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![20, 10, 2]);
        // height(A) = 2×height(B) = 10×height(C).
        assert_eq!(heights[0], 2 * heights[1]);
        assert_eq!(heights[0], 10 * heights[2]);
    }

    #[test]
    fn bars_sit_on_a_common_baseline() {
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        for bar in &layout.bars {
            assert_eq!(bar.y + bar.height, layout.baseline);
        }
    }

    #[test]
    fn bars_advance_left_to_right_with_spacing() {
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        let xs: Vec<u16> = layout.bars.iter().map(|b| b.x).collect();
        // pad_x 2, step = bar_width 2 + spacing 1.
        assert_eq!(xs, vec![2, 5, 8]);
    }

    #[test]
    fn colors_cycle_through_palette_by_group_position() {
        let mut cases = Vec::new();
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            cases.extend(failing("t", name, 10 - i as u32));
        }
        let agg = aggregate(&Dataset::from_cases(cases), 7);
        let layout = compute(&agg, &params(), 30, 3);
        let colors: Vec<usize> = layout.bars.iter().map(|b| b.color_index).collect();
        assert_eq!(colors, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let mut cases: Vec<TestCase> = failing("failing_test", "w", 3).collect();
        cases.push(TestCase {
            test_name: "all_green".to_owned(),
            passed: true,
            witness: String::new(),
        });
        let agg = aggregate(&Dataset::from_cases(cases), 5);
        let layout = compute(&agg, &params(), 24, PALETTE_LEN);
        assert_eq!(layout.bars.len(), 3);
        assert_eq!(layout.labels.len(), 1);
        assert_eq!(layout.labels[0].test_name, "failing_test");
    }

    #[test]
    fn no_failing_data_yields_empty_layout() {
        let agg = aggregate(
            &Dataset::from_cases([TestCase {
                test_name: "t".to_owned(),
                passed: true,
                witness: String::new(),
            }]),
            5,
        );
        let layout = compute(&agg, &params(), 24, PALETTE_LEN);
        assert!(layout.bars.is_empty());
        assert!(layout.labels.is_empty());
    }

    #[test]
    fn tiny_pane_yields_empty_layout() {
        let layout = compute(&t1_aggregate(), &params(), 2, PALETTE_LEN);
        assert!(layout.bars.is_empty());
    }

    #[test]
    fn hit_test_inside_returns_witness() {
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        // Bar A: x 2..4, y 0..20.
        assert_eq!(layout.hit_test(2, 0), Some("A"));
        assert_eq!(layout.hit_test(3, 19), Some("A"));
        // Bar B: x 5..7, y 10..20.
        assert_eq!(layout.hit_test(5, 10), Some("B"));
        // Bar C: x 8..10, y 18..20.
        assert_eq!(layout.hit_test(9, 19), Some("C"));
    }

    #[test]
    fn hit_test_outside_returns_none() {
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        assert_eq!(layout.hit_test(0, 0), None); // left padding
        assert_eq!(layout.hit_test(4, 0), None); // gap between bars
        assert_eq!(layout.hit_test(5, 9), None); // above bar B
        assert_eq!(layout.hit_test(3, 20), None); // below the baseline
        assert_eq!(layout.hit_test(70, 12), None); // far right
    }

    #[test]
    fn labels_are_centered_below_groups() {
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        assert_eq!(layout.labels.len(), 1);
        let label = &layout.labels[0];
        // Group spans x 2..11 (3 bars × step 3), center offset 4.
        assert_eq!(label.anchor_x, 2 + 4);
        assert_eq!(label.anchor_y, layout.baseline);
    }

    #[test]
    fn preferred_size_covers_content() {
        let mut cases = Vec::new();
        for i in 0..12 {
            cases.extend(failing(&format!("test_{i:02}"), "w", 2));
        }
        let agg = aggregate(&Dataset::from_cases(cases), 5);
        let layout = compute(&agg, &params(), 24, PALETTE_LEN);
        let last = layout.bars.last().unwrap();
        assert!(layout.preferred_width > last.x + last.width);
        assert!(layout.preferred_height > layout.baseline);
    }

    #[test]
    fn huge_group_count_pins_to_the_right_edge_without_wrapping() {
        // Enough single-bar groups to push the x cursor past u16::MAX.
        let mut cases = Vec::new();
        for i in 0..10_000 {
            cases.extend(failing(&format!("t{i:05}"), "w", 1));
        }
        let agg = aggregate(&Dataset::from_cases(cases), 5);
        let layout = compute(&agg, &params(), 24, PALETTE_LEN);
        assert_eq!(layout.bars.len(), 10_000);
        // Positions never decrease: far-right bars clamp instead of
        // wrapping back to low columns.
        for pair in layout.bars.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
        assert_eq!(layout.bars.last().unwrap().x, u16::MAX);
        assert_eq!(layout.preferred_width, u16::MAX);
    }

    #[test]
    fn cache_starts_stale_and_refreshes_once() {
        let mut cache = LayoutCache::default();
        assert!(!cache.is_fresh());
        assert!(cache.get().is_none());

        let mut calls = 0;
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        cache.ensure(|| {
            calls += 1;
            layout.clone()
        });
        assert!(cache.is_fresh());
        // Second ensure must reuse the cached value.
        cache.ensure(|| {
            calls += 1;
            ChartLayout::default()
        });
        assert_eq!(calls, 1);
        assert_eq!(cache.get(), Some(&layout));
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut cache = LayoutCache::Fresh(ChartLayout::default());
        cache.invalidate();
        assert!(cache.get().is_none());
        let layout = compute(&t1_aggregate(), &params(), 24, PALETTE_LEN);
        let fresh = cache.ensure(|| layout.clone());
        assert_eq!(fresh, &layout);
    }
}
