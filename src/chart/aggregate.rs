//! Witness frequency aggregation with top-K truncation.
//!
//! For each distinct test name, failing cases are tallied per witness
//! string; passing cases never contribute. When a test accumulates more
//! distinct witnesses than `max_bars`, only the most frequent survive.
//!
//! Ordering is deterministic everywhere: descending count, ties broken
//! lexicographically by witness name. This applies to every group, not
//! just truncated ones, so reloading an identical file always yields an
//! identical chart.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use crate::model::Dataset;

/// Ordered witness tally for one test case group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTally {
    /// Test name this tally belongs to.
    pub test_name: String,
    /// (witness, failing count) in selection order, len ≤ max_bars.
    pub witnesses: Vec<(String, u32)>,
}

impl TestTally {
    /// Largest single-witness count in this group, 0 when empty.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        // Selection order is descending, so the first entry is the max.
        self.witnesses.first().map_or(0, |(_, count)| *count)
    }

    /// True when this test had no failing cases at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.witnesses.is_empty()
    }
}

/// Aggregation result across all test cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Per-test tallies in dataset (sorted) order. Groups with zero
    /// failing cases are present but empty.
    pub tallies: Vec<TestTally>,
    /// Largest single-witness count observed across all tests, measured
    /// before truncation.
    pub global_max: u32,
}

impl Aggregate {
    /// Tallies that will actually produce bars.
    pub fn non_empty(&self) -> impl Iterator<Item = &TestTally> {
        self.tallies.iter().filter(|t| !t.is_empty())
    }
}

/// Tally failing-case witnesses per test, truncating each group to the
/// `max_bars` most frequent.
#[must_use]
pub fn aggregate(dataset: &Dataset, max_bars: usize) -> Aggregate {
    let mut tallies = Vec::with_capacity(dataset.test_count());
    let mut global_max = 0u32;

    for test_name in dataset.test_names() {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for case in dataset.cases_for(test_name) {
            if !case.passed {
                let count = counts.entry(case.witness.as_str()).or_insert(0);
                *count += 1;
                global_max = global_max.max(*count);
            }
        }

        let mut witnesses: Vec<(String, u32)> = counts
            .into_iter()
            .map(|(witness, count)| (witness.to_owned(), count))
            .collect();
        // Descending count; the BTreeMap already yields names ascending,
        // and the stable sort preserves that for equal counts.
        witnesses.sort_by(|a, b| b.1.cmp(&a.1));
        witnesses.truncate(max_bars);

        tallies.push(TestTally {
            test_name: test_name.to_owned(),
            witnesses,
        });
    }

    Aggregate {
        tallies,
        global_max,
    }
}
