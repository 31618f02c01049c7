//! Analysis modules.
//!
//! Grouped numeric aggregation for tabular data, plus the simpler
//! counting and grouping used by the spreadsheet, JSON and text reports.

pub mod aggregator;
pub mod counting;

pub use aggregator::*;
pub use counting::*;
