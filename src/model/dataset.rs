//! Test-execution dataset loaded from a JSONL results file.
//!
//! Each line is a self-contained JSON object:
//! `{"test": "parser::roundtrip", "passed": false, "witness": "cex-17"}`.
//! Malformed lines are counted and skipped — a half-written results file
//! must never take the viewer down. The dataset is replaced wholesale on
//! reload; nothing here mutates in place after construction.

#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, VizError};

/// One executed test instance, belonging to a named test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Name of the test this case belongs to.
    #[serde(rename = "test")]
    pub test_name: String,
    /// Pass/fail outcome.
    pub passed: bool,
    /// Witness identifier explaining a failure. Empty for passing cases.
    #[serde(default)]
    pub witness: String,
}

/// Immutable collection of test cases indexed by test name.
///
/// Keyed by a `BTreeMap` so iteration order — and therefore chart group
/// order — is stable across reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    cases: BTreeMap<String, Vec<TestCase>>,
    total_cases: usize,
    skipped_lines: usize,
}

impl Dataset {
    /// Build a dataset from individual cases (used by tests and the loader).
    #[must_use]
    pub fn from_cases(cases: impl IntoIterator<Item = TestCase>) -> Self {
        let mut index: BTreeMap<String, Vec<TestCase>> = BTreeMap::new();
        let mut total = 0;
        for case in cases {
            total += 1;
            index.entry(case.test_name.clone()).or_default().push(case);
        }
        Self {
            cases: index,
            total_cases: total,
            skipped_lines: 0,
        }
    }

    /// Load a dataset from a JSONL results file.
    ///
    /// Lines that fail to parse are skipped and counted; only a missing or
    /// unreadable file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VizError::MissingResults {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path).map_err(|e| VizError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut dataset = Self::default();
        for line in reader.lines() {
            let line = line.map_err(|e| VizError::io(path, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<TestCase>(trimmed) {
                Ok(case) => {
                    dataset.total_cases += 1;
                    dataset
                        .cases
                        .entry(case.test_name.clone())
                        .or_default()
                        .push(case);
                }
                Err(_) => dataset.skipped_lines += 1,
            }
        }
        Ok(dataset)
    }

    /// All distinct test names, in stable sorted order.
    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.cases.keys().map(String::as_str)
    }

    /// Test cases recorded for a given test name.
    #[must_use]
    pub fn cases_for(&self, test_name: &str) -> &[TestCase] {
        self.cases.get(test_name).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct test names.
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.cases.len()
    }

    /// Total number of cases across all tests.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.total_cases
    }

    /// Lines skipped during loading because they failed to parse.
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// (passed, failed) totals for one test name.
    #[must_use]
    pub fn outcome_totals(&self, test_name: &str) -> (usize, usize) {
        let cases = self.cases_for(test_name);
        let passed = cases.iter().filter(|c| c.passed).count();
        (passed, cases.len() - passed)
    }

    /// True when no cases were loaded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

// ──────────────────── reloadable source ────────────────────

/// Watches a results file and reloads it when its mtime changes.
///
/// The viewer polls this on the refresh tick; a changed file replaces the
/// dataset wholesale ("new data source" semantics).
#[derive(Debug)]
pub struct ResultsSource {
    path: PathBuf,
    last_mtime: Option<SystemTime>,
}

impl ResultsSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_mtime: None,
        }
    }

    /// Path to the watched results file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load unconditionally, recording the file's current mtime.
    pub fn load(&mut self) -> Result<Dataset> {
        self.last_mtime = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        Dataset::load(&self.path)
    }

    /// Reload only if the file changed since the last load.
    ///
    /// Returns `Ok(None)` when the file is unchanged or currently missing;
    /// a missing file is not fatal between ticks.
    pub fn poll(&mut self) -> Result<Option<Dataset>> {
        let Ok(mtime) = fs::metadata(&self.path).and_then(|m| m.modified()) else {
            return Ok(None);
        };
        if self.last_mtime == Some(mtime) {
            return Ok(None);
        }
        self.load().map(Some)
    }
}
