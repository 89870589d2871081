//! Data model and numerics for compare-stats.
//!
//! This crate holds everything needed to read one benchmark's result
//! directory and reason about it statistically: the property-file parser,
//! the [`DataSet`] sample container, the [`Results`] and [`Subresults`]
//! records, percent-difference, and the Welch two-sample t-test. The
//! comparator CLI and other consumers (such as the bar-chart viewer, which
//! reads [`Subresults`] only) build on these types.

pub mod dataset;
pub mod error;
pub mod props;
pub mod results;
pub mod stats;
pub mod subresults;

// Re-export main types for convenience
pub use dataset::DataSet;
pub use error::{ResultsError, StatsError};
pub use results::{Direction, Kind, Results};
pub use stats::{percent_diff, welch_t_test, TTest};
pub use subresults::Subresults;
