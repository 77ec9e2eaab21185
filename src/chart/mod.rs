//! Bar-chart core: witness aggregation, layout arithmetic, and hit-testing.
//!
//! Pure data → geometry transforms with no terminal I/O, so everything in
//! here is unit-testable headlessly.

pub mod aggregate;
pub mod layout;

pub use aggregate::{Aggregate, TestTally, aggregate};
pub use layout::{Bar, ChartLayout, LayoutCache, LayoutParams};
