//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use witness_viz::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, VizError};

// Model
pub use crate::model::{Dataset, ResultsSource, TestCase};

// Chart
pub use crate::chart::{Aggregate, Bar, ChartLayout, LayoutCache, LayoutParams, TestTally, aggregate};

// TUI
pub use crate::tui::{ViewerConfig, run};

// Logging
pub use crate::logger::{EventType, JsonlLogger};
