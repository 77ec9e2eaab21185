#![forbid(unsafe_code)]

//! Witness Viz (wviz) — terminal dashboard for test-execution results.
//!
//! Visualizes the distribution of failure witnesses per test case as a
//! bar chart: failing cases are tallied per witness, each test keeps its
//! top five witnesses, and bar heights scale to the group's maximum
//! count. The chart lives in a split-pane dashboard refreshed on a
//! fixed timer, with hover tooltips and live reload when the results
//! file changes.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use witness_viz::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use witness_viz::chart::aggregate;
//! use witness_viz::model::Dataset;
//! ```

pub mod prelude;

pub mod chart;
pub mod core;
pub mod logger;
pub mod model;
pub mod tui;
