//! compare-stats: tabular statistical comparison of benchmark result trees.
//!
//! Reads two or more run directories produced by the benchmark harness,
//! takes the first as the baseline and prints one comparison table per
//! specimen run, annotating each benchmark with the percent difference and
//! the two-tailed p-value of a Welch t-test.

pub mod cli;
pub mod compare;
pub mod report;

// Re-export core types for convenience
pub use compare_stats_core::{
    percent_diff, welch_t_test, DataSet, Direction, Kind, Results, ResultsError, StatsError,
    Subresults, TTest,
};

pub use cli::Cli;
pub use compare::{read_run, Comparator, CompareError};
