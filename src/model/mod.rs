//! Dataset model: test cases, the indexed dataset, and the reloadable
//! results source.

pub mod dataset;

pub use dataset::{Dataset, ResultsSource, TestCase};
