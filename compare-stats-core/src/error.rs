use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating and parsing result files.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// The directory could not be listed or a file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No `results.*` file in the result directory.
    #[error("No results file found in directory {}", .0.display())]
    NoResultsFile(PathBuf),

    /// More than one `results.*` file in the result directory.
    #[error("Expected 1 results file, found {count} in directory {}", .directory.display())]
    MultipleResultsFiles { directory: PathBuf, count: usize },

    /// A required key was missing or a value was malformed.
    #[error("Error parsing results file {}: {reason}", .file.display())]
    Parse { file: PathBuf, reason: String },

    /// A sub-benchmark label that belongs to neither direction set.
    #[error("Unknown sub-benchmark name {0}")]
    UnknownSubresult(String),

    /// Baseline and specimen disagree on direction-of-goodness.
    #[error("Specimen and baseline disposition don't match")]
    IncomparableResults,
}

impl ResultsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ResultsError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ResultsError::Parse {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

/// Numeric failures from the statistics routines.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The t-test needs at least two observations on each side.
    #[error("t-test requires at least two samples per group, got {n1} and {n2}")]
    InsufficientSamples { n1: usize, n2: usize },

    /// The Student-t distribution could not be constructed.
    #[error("Invalid Student-t degrees of freedom: {df}")]
    InvalidDegreesOfFreedom { df: f64 },
}
